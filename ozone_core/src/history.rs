//! Bounded FIFO trend buffer; also closes the feedback loop.

use std::collections::VecDeque;

use crate::setpoints::FeedbackSample;
use ozone_traits::{TrendPoint, TrendSink};

/// Insertion-ordered history of past tick outputs, capacity-bounded with
/// oldest-first eviction. Used for feedback lookback and handed to chart
/// consumers; nothing else reads it.
#[derive(Debug)]
pub struct HistoryBuffer {
    points: VecDeque<TrendPoint>,
    capacity: usize,
}

impl HistoryBuffer {
    /// `capacity` is floored to 1; a zero-capacity buffer could never close
    /// the feedback loop.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newest entry, if any.
    pub fn latest(&self) -> Option<&TrendPoint> {
        self.points.back()
    }

    /// Oldest-to-newest iteration for chart consumers.
    pub fn iter(&self) -> impl Iterator<Item = &TrendPoint> {
        self.points.iter()
    }

    /// Feedback for the next controller step: the newest entry, or the
    /// documented default when no tick has run yet.
    pub fn feedback(&self) -> FeedbackSample {
        self.latest()
            .map(|p| FeedbackSample {
                quality: p.quality,
                residual: p.residual,
            })
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl TrendSink for HistoryBuffer {
    fn push(&mut self, point: TrendPoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }
}
