//! Reproducibility of disturbance runs under a fixed seed.

use ozone_core::{NoiseCfg, SeededNoise, Setpoints, Simulation};
use rstest::rstest;

fn seeded_sim(seed: u64) -> Simulation {
    Simulation::builder()
        .with_setpoints(Setpoints::default())
        .with_noise_source(SeededNoise::from_seed(seed))
        .with_disturbance(true)
        .build()
        .expect("simulation build")
}

#[rstest]
fn same_seed_reproduces_every_metric() {
    let mut a = seeded_sim(42);
    let mut b = seeded_sim(42);
    for _ in 0..10 {
        let ra = a.tick();
        let rb = b.tick();
        assert_eq!(ra.metrics, rb.metrics);
        assert_eq!(ra.actuation, rb.actuation);
    }
}

#[rstest]
fn different_seeds_diverge_in_perturbed_inputs() {
    let mut a = seeded_sim(1);
    let mut b = seeded_sim(2);
    let mut diverged = false;
    for _ in 0..5 {
        let ra = a.tick();
        let rb = b.tick();
        if ra.metrics.temp != rb.metrics.temp || ra.metrics.ph != rb.metrics.ph {
            diverged = true;
        }
    }
    assert!(diverged, "two seeds produced identical disturbance streams");
}

#[rstest]
fn perturbed_inputs_stay_within_noise_half_widths() {
    let noise = NoiseCfg::default();
    let sp = Setpoints::default();
    let mut sim = seeded_sim(7);
    for _ in 0..50 {
        let r = sim.tick();
        assert!((r.metrics.temp - sp.temp).abs() <= noise.temp_half_width + 1e-12);
        assert!((r.metrics.ph - sp.ph).abs() <= noise.ph_half_width + 1e-12);
    }
}

#[rstest]
fn disturbance_off_is_fully_deterministic() {
    // Entropy-seeded noise source is irrelevant while the flag is off.
    let mut a = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .build()
        .expect("simulation build");
    let mut b = Simulation::builder()
        .with_setpoints(Setpoints::default())
        .build()
        .expect("simulation build");
    for _ in 0..10 {
        assert_eq!(a.tick().metrics, b.tick().metrics);
    }
}
