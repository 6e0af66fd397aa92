//! Test and helper doubles for the collaborator seams.

use std::sync::{Arc, Mutex};

use ozone_traits::{EventSink, NoiseSource};

/// Event sink that discards everything; the builder default.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn log(&self, _message: &str) {}
}

/// Event sink that records every line; share the handle to inspect from a
/// test after the simulation is moved into the runner.
#[derive(Default, Clone)]
pub struct MemoryEventSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl EventSink for MemoryEventSink {
    fn log(&self, message: &str) {
        if let Ok(mut g) = self.lines.lock() {
            g.push(message.to_string());
        }
    }
}

/// Noise source that always returns the same unit value; lets tests pin the
/// disturbance to an exact offset.
pub struct ConstNoise(pub f64);

impl NoiseSource for ConstNoise {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}
