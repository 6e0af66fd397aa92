//! Simulation state machine and paced runner behavior.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use ozone_core::mocks::MemoryEventSink;
use ozone_core::runner::{self, RunCfg};
use ozone_core::{BuildError, Setpoints, Simulation};
use ozone_traits::ManualClock;
use rstest::rstest;

#[rstest]
fn builder_rejects_bad_ramp() {
    let cfg = ozone_core::ControlCfg {
        ozone_ramp: 0.0,
        ..ozone_core::ControlCfg::default()
    };
    let err = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_control(cfg)
        .build()
        .expect_err("zero ramp must be rejected");
    let be = err
        .downcast_ref::<BuildError>()
        .expect("expected BuildError inside Report");
    assert!(matches!(be, BuildError::InvalidConfig(_)));
}

#[rstest]
fn history_is_capacity_bounded_fifo() {
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_history_capacity(50)
        .build()
        .expect("simulation build");
    for _ in 0..200 {
        sim.tick();
    }
    assert_eq!(sim.history().len(), 50);
    assert_eq!(sim.ticks(), 200);
}

#[rstest]
fn feedback_loop_closes_through_history() {
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .build()
        .expect("simulation build");
    let first = sim.tick();
    // The next tick's feedback is the first tick's outcome
    let fb = sim.history().feedback();
    assert_eq!(fb.quality, first.metrics.quality);
    assert_eq!(fb.residual, first.metrics.residual);
}

#[rstest]
fn scenario_and_disturbance_transitions_are_announced() {
    let events = MemoryEventSink::new();
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_event_sink(events.clone())
        .build()
        .expect("simulation build");

    let peak = ozone_config::builtin_scenarios()
        .into_iter()
        .find(|s| s.name == "peak")
        .expect("builtin peak scenario");
    sim.apply_scenario(&peak);
    assert_eq!(sim.setpoints().contamination, 55.0);
    assert_eq!(sim.active_scenario(), Some("Peak contaminant load"));

    sim.set_disturbance(true);
    sim.set_disturbance(true); // no transition, no extra event
    sim.set_disturbance(false);
    sim.reset();
    assert_eq!(sim.ticks(), 0);
    assert!(sim.history().is_empty());

    let lines = events.lines();
    assert_eq!(
        lines,
        vec![
            "Scenario applied: Peak contaminant load".to_string(),
            "Disturbance injection enabled.".to_string(),
            "Disturbance injection disabled.".to_string(),
            "State reset to current setpoints.".to_string(),
        ]
    );
}

#[rstest]
fn reset_reseats_actuators_at_requested_values() {
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .build()
        .expect("simulation build");
    for _ in 0..5 {
        sim.tick();
    }
    assert_ne!(sim.controller_state().ozone, 120.0);
    sim.reset();
    assert_eq!(sim.controller_state().ozone, 120.0);
    assert_eq!(sim.controller_state().contact, 14.0);
}

#[rstest]
fn runner_stops_at_max_ticks_and_brackets_with_events() {
    let events = MemoryEventSink::new();
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_event_sink(events.clone())
        .build()
        .expect("simulation build");

    let clock = ManualClock::new();
    let stop = Arc::new(AtomicBool::new(false));
    let cfg = RunCfg {
        max_ticks: Some(5),
        ..RunCfg::default()
    };
    let mut seen = 0u64;
    let summary = runner::run(&mut sim, &cfg, &clock, &stop, |_report| seen += 1);

    assert_eq!(summary.ticks, 5);
    assert_eq!(seen, 5);
    assert!(summary.last.is_some());
    let lines = events.lines();
    assert!(lines.first().is_some_and(|l| l.contains("started")));
    assert!(lines.last().is_some_and(|l| l.contains("stopped")));
}

#[rstest]
fn runner_honors_cooperative_stop_before_first_tick() {
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .build()
        .expect("simulation build");
    let clock = ManualClock::new();
    let stop = Arc::new(AtomicBool::new(true));
    let summary = runner::run(&mut sim, &RunCfg::default(), &clock, &stop, |_| {});
    assert_eq!(summary.ticks, 0);
    assert!(summary.last.is_none());
    assert_eq!(sim.ticks(), 0);
}

#[rstest]
fn disturbance_notices_are_throttled() {
    let events = MemoryEventSink::new();
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_event_sink(events.clone())
        .with_disturbance(true)
        .build()
        .expect("simulation build");

    // ManualClock advances 900 ms per sleep; over 10 ticks the 7 s throttle
    // admits the notice at t=0 and t=7200 only.
    let clock = ManualClock::new();
    let stop = Arc::new(AtomicBool::new(false));
    let cfg = RunCfg {
        tick_ms: 900,
        max_ticks: Some(10),
        event_throttle_ms: 7_000,
    };
    runner::run(&mut sim, &cfg, &clock, &stop, |_| {});

    let notices = events
        .lines()
        .iter()
        .filter(|l| l.contains("Disturbance detected"))
        .count();
    assert_eq!(notices, 2);
}

#[rstest]
fn setpoint_edits_take_effect_next_tick() {
    let mut sim = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .build()
        .expect("simulation build");
    sim.tick();
    // A hydraulic-shock edit between ticks raises the energy draw next tick
    let before = sim.tick().metrics.energy;
    sim.set_setpoints(Setpoints {
        flow: 110.0,
        ..Setpoints::default()
    });
    let after = sim.tick().metrics.energy;
    assert!(after > before);
}
