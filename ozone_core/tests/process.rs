//! Process model contract: clamp bounds, determinism, and the worked
//! nominal operating point.

use ozone_core::process::{self, evaluate};
use ozone_core::{Disturbance, ProcessCfg, ProcessMetrics, ProcessState};
use rstest::rstest;

fn assert_bounded(m: &ProcessMetrics) {
    assert!(
        (process::QUALITY_MIN..=process::QUALITY_MAX).contains(&m.quality),
        "quality {}",
        m.quality
    );
    assert!(
        (0.0..=process::RESIDUAL_MAX).contains(&m.residual),
        "residual {}",
        m.residual
    );
    assert!(
        (process::EFFICIENCY_MIN..=process::EFFICIENCY_MAX).contains(&m.efficiency),
        "efficiency {}",
        m.efficiency
    );
    assert!(
        (process::ENERGY_MIN..=process::ENERGY_MAX).contains(&m.energy),
        "energy {}",
        m.energy
    );
    assert!(
        (process::ORP_MIN..=process::ORP_MAX).contains(&m.orp),
        "orp {}",
        m.orp
    );
    assert!(
        (process::UV_MIN..=process::UV_MAX).contains(&m.uv254),
        "uv254 {}",
        m.uv254
    );
}

#[rstest]
// nominal
#[case(65.0, 22.0, 120.0, 14.0, 18.0, 7.2)]
// peak contaminant load
#[case(75.0, 55.0, 180.0, 20.0, 19.0, 7.0)]
// cold water
#[case(58.0, 30.0, 150.0, 18.0, 8.0, 7.4)]
// hydraulic shock
#[case(110.0, 26.0, 170.0, 10.0, 16.0, 7.1)]
// extremes after sanitization
#[case(0.1, 0.1, 280.0, 32.0, -5.0, 4.0)]
#[case(500.0, 200.0, 40.0, 6.0, 45.0, 10.0)]
fn all_outputs_within_documented_bounds(
    #[case] flow: f64,
    #[case] contamination: f64,
    #[case] ozone: f64,
    #[case] contact: f64,
    #[case] temp: f64,
    #[case] ph: f64,
) {
    let cfg = ProcessCfg::default();
    let state = ProcessState {
        flow,
        contamination,
        ozone,
        contact,
        temp,
        ph,
    };
    let m = evaluate(&cfg, &state, &Disturbance::NOMINAL);
    assert_bounded(&m);
}

#[rstest]
fn nominal_disturbance_is_bit_identical() {
    let cfg = ProcessCfg::default();
    let state = ProcessState {
        flow: 65.0,
        contamination: 22.0,
        ozone: 120.0,
        contact: 14.0,
        temp: 18.0,
        ph: 7.2,
    };
    let a = evaluate(&cfg, &state, &Disturbance::NOMINAL);
    let b = evaluate(&cfg, &state, &Disturbance::NOMINAL);
    assert_eq!(a, b);
    // Perturbed temp/pH echo the nominal inputs exactly when undisturbed
    assert_eq!(a.temp, 18.0);
    assert_eq!(a.ph, 7.2);
}

#[rstest]
fn pinned_disturbance_shifts_modeled_inputs() {
    let cfg = ProcessCfg::default();
    let state = ProcessState {
        flow: 65.0,
        contamination: 22.0,
        ozone: 120.0,
        contact: 14.0,
        temp: 18.0,
        ph: 7.2,
    };
    let d = Disturbance {
        temp_offset: 0.4,
        ph_offset: -0.06,
        pressure: 0.96,
    };
    let m = evaluate(&cfg, &state, &d);
    assert_eq!(m.temp, 18.4);
    assert!((m.ph - 7.14).abs() < 1e-12);
    assert_bounded(&m);
}

/// Worked nominal point with the actuated dose from the documented first
/// controller step: quality saturates high, residual stays safe.
#[rstest]
fn nominal_operating_point_reads_healthy() {
    let cfg = ProcessCfg::default();
    let state = ProcessState {
        flow: 65.0,
        contamination: 22.0,
        ozone: 102.0,
        contact: 11.0 + 22.0 / 9.0 - 5.0 / 22.0,
        temp: 18.0,
        ph: 7.2,
    };
    let m = evaluate(&cfg, &state, &Disturbance::NOMINAL);
    assert!(m.quality >= 88.0, "quality {}", m.quality);
    assert!(m.residual < 0.4, "residual {}", m.residual);
}

#[rstest]
fn dose_drives_residual_up_and_oxidation_consumes_it() {
    let cfg = ProcessCfg::default();
    let base = ProcessState {
        flow: 65.0,
        contamination: 22.0,
        ozone: 120.0,
        contact: 14.0,
        temp: 18.0,
        ph: 7.2,
    };
    let heavy = ProcessState {
        ozone: 280.0,
        ..base
    };
    let light = ProcessState { ozone: 60.0, ..base };
    let heavy_m = evaluate(&cfg, &heavy, &Disturbance::NOMINAL);
    let light_m = evaluate(&cfg, &light, &Disturbance::NOMINAL);
    assert!(heavy_m.residual > light_m.residual);
    assert!(heavy_m.energy > light_m.energy);
}
