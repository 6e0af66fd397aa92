//! Paced tick loop with cooperative cancellation.
//!
//! The runner owns no simulation state; it invokes `Simulation::tick()` on a
//! fixed cadence through the `Clock` seam, checks the stop flag before every
//! tick, and throttles repeated disturbance notices. Ticks are atomic and
//! never overlap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::sim::{Simulation, TickReport};
use ozone_traits::Clock;

/// Run pacing and termination knobs.
#[derive(Debug, Clone, Copy)]
pub struct RunCfg {
    /// Tick cadence in milliseconds (floored to 1).
    pub tick_ms: u64,
    /// Stop after this many ticks; `None` runs until the stop flag is set.
    pub max_ticks: Option<u64>,
    /// Minimum spacing between repeated disturbance notices, ms.
    pub event_throttle_ms: u64,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self {
            tick_ms: 900,
            max_ticks: None,
            event_throttle_ms: 7_000,
        }
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Ticks executed by this run.
    pub ticks: u64,
    /// Report of the final tick, if any ran.
    pub last: Option<TickReport>,
}

/// True when enough time has passed since the last notice to emit another.
#[inline]
fn throttle_elapsed(now_ms: u64, last_ms: Option<u64>, throttle_ms: u64) -> bool {
    match last_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= throttle_ms,
    }
}

/// Drive the simulation until the stop flag is raised or `max_ticks` is
/// reached. Per-tick reports are handed to `on_tick` (rendering, JSONL
/// output); the callback runs inside the tick slot, before the next sleep.
pub fn run<C: Clock>(
    sim: &mut Simulation,
    cfg: &RunCfg,
    clock: &C,
    stop: &Arc<AtomicBool>,
    mut on_tick: impl FnMut(&TickReport),
) -> RunSummary {
    let period = Duration::from_millis(cfg.tick_ms.max(1));
    let epoch = clock.now();
    let mut last_notice_ms: Option<u64> = None;
    let mut ticks = 0u64;
    let mut last = None;

    sim.events()
        .log("Simulation started; control loops in automatic mode.");
    tracing::info!(tick_ms = cfg.tick_ms, "run start");

    loop {
        // Cancellation is cooperative and checked between ticks only; there
        // is no in-flight work to abort.
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if let Some(max) = cfg.max_ticks
            && ticks >= max
        {
            break;
        }

        let report = sim.tick();
        on_tick(&report);
        ticks += 1;
        last = Some(report);

        if sim.disturbance() {
            let now_ms = clock.ms_since(epoch);
            if throttle_elapsed(now_ms, last_notice_ms, cfg.event_throttle_ms) {
                sim.events()
                    .log("Disturbance detected: adjusting ozone dose and contact time setpoints.");
                last_notice_ms = Some(now_ms);
            }
        }

        clock.sleep(period);
    }

    sim.events()
        .log("Simulation stopped; returning to manual mode.");
    tracing::info!(ticks, "run stop");

    RunSummary { ticks, last }
}

#[cfg(test)]
mod tests {
    use super::throttle_elapsed;

    #[test]
    fn first_notice_is_never_throttled() {
        assert!(throttle_elapsed(0, None, 7_000));
    }

    #[test]
    fn throttle_respects_spacing() {
        assert!(!throttle_elapsed(5_000, Some(0), 7_000));
        assert!(throttle_elapsed(7_000, Some(0), 7_000));
        assert!(throttle_elapsed(20_000, Some(7_000), 7_000));
    }

    #[test]
    fn throttle_saturates_on_clock_skew() {
        // now < last must not underflow
        assert!(!throttle_elapsed(100, Some(5_000), 7_000));
    }
}
