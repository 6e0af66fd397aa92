//! `From` implementations bridging `ozone_config` types to `ozone_core` types.
//!
//! These keep the CLI free of field-by-field mapping.

use crate::config::{ControlCfg, NoiseCfg, ProcessCfg};
use crate::runner::RunCfg;

// ── ControlCfg ───────────────────────────────────────────────────────────────

impl From<&ozone_config::ControlCfg> for ControlCfg {
    fn from(c: &ozone_config::ControlCfg) -> Self {
        Self {
            contamination_gain: c.contamination_gain,
            flow_gain: c.flow_gain,
            quality_gain: c.quality_gain,
            residual_guard: c.residual_guard,
            residual_step: c.residual_step,
            ozone_min: c.ozone_min,
            ozone_max: c.ozone_max,
            ozone_ramp: c.ozone_ramp,
            contact_base: c.contact_base,
            contact_load_div: c.contact_load_div,
            contact_flow_ref: c.contact_flow_ref,
            contact_flow_div: c.contact_flow_div,
            contact_min: c.contact_min,
            contact_max: c.contact_max,
            contact_ramp: c.contact_ramp,
        }
    }
}

// ── ProcessCfg ───────────────────────────────────────────────────────────────

impl From<&ozone_config::ProcessCfg> for ProcessCfg {
    fn from(c: &ozone_config::ProcessCfg) -> Self {
        // Factor clamp ranges are plausibility limits and stay at their
        // defaults; only the tunable coefficients come from the TOML.
        Self {
            temp_optimum: c.temp_optimum,
            temp_slope: c.temp_slope,
            ph_optimum: c.ph_optimum,
            ph_slope: c.ph_slope,
            mixing_flow_coeff: c.mixing_flow_coeff,
            mixing_gain: c.mixing_gain,
            demand_coeff: c.demand_coeff,
            oxidation_cap: c.oxidation_cap,
            ..Self::default()
        }
    }
}

// ── NoiseCfg ─────────────────────────────────────────────────────────────────

impl From<&ozone_config::NoiseCfg> for NoiseCfg {
    fn from(c: &ozone_config::NoiseCfg) -> Self {
        Self {
            temp_half_width: c.temp_half_width,
            ph_half_width: c.ph_half_width,
            pressure_half_width: c.pressure_half_width,
        }
    }
}

// ── RunCfg ───────────────────────────────────────────────────────────────────

impl From<&ozone_config::SimulationCfg> for RunCfg {
    fn from(c: &ozone_config::SimulationCfg) -> Self {
        Self {
            tick_ms: c.tick_ms,
            max_ticks: None,
            event_throttle_ms: c.event_throttle_ms,
        }
    }
}
