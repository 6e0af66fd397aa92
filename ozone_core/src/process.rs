//! Nonlinear oxidation model mapping actuated state to water-quality metrics.
//!
//! The oxidation index is the central quantity: dose × contact × mixing ×
//! temperature × pH × pressure over contaminant demand, with every factor
//! clamped before combination. All derived metrics are clamped to a
//! physically-plausible range, so downstream consumers can assume bounded,
//! finite values.

use crate::config::ProcessCfg;
use crate::controller::ControllerState;
use crate::noise::Disturbance;
use crate::setpoints::Setpoints;

// Plausibility bounds and coefficients of the derived metrics. These model
// the instrumentation ranges of the plant and are not tuning knobs.

/// Quality floor/ceiling, percent.
pub const QUALITY_MIN: f64 = 12.0;
pub const QUALITY_MAX: f64 = 99.0;

/// Residual ozone: dose-to-flow carryover minus consumption credit, mg/L.
const RESIDUAL_DOSE_COEFF: f64 = 0.32;
const RESIDUAL_OXIDATION_CREDIT: f64 = 0.12;
pub const RESIDUAL_MAX: f64 = 2.6;

/// Treatment efficiency: oxidation-weighted with a mixing contribution.
const EFFICIENCY_OXIDATION_WEIGHT: f64 = 0.88;
const EFFICIENCY_MIXING_WEIGHT: f64 = 0.12;
pub const EFFICIENCY_MIN: f64 = 0.1;
pub const EFFICIENCY_MAX: f64 = 1.2;

/// Specific energy: generator draw plus pumping, kWh/m³.
const ENERGY_OZONE_COEFF: f64 = 0.017;
const ENERGY_FLOW_COEFF: f64 = 0.004;
const ENERGY_BASE: f64 = 0.4;
pub const ENERGY_MIN: f64 = 0.5;
pub const ENERGY_MAX: f64 = 6.4;

/// Oxidation-reduction potential, mV.
const ORP_BASE: f64 = 550.0;
const ORP_OXIDATION_GAIN: f64 = 180.0;
const ORP_CONTAMINATION_LOSS: f64 = 1.2;
pub const ORP_MIN: f64 = 420.0;
pub const ORP_MAX: f64 = 780.0;

/// UV254 absorbance indicator.
const UV_BASE: f64 = 2.1;
const UV_CONTAMINATION_DIV: f64 = 12.0;
const UV_OXIDATION_GAIN: f64 = 1.2;
pub const UV_MIN: f64 = 0.5;
pub const UV_MAX: f64 = 5.2;

/// The process inputs for one tick: sanitized setpoints with the actuated
/// dose pair substituted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessState {
    pub flow: f64,
    pub contamination: f64,
    /// Actuated ozone dose, mg/h.
    pub ozone: f64,
    /// Actuated contact time, minutes.
    pub contact: f64,
    pub temp: f64,
    pub ph: f64,
}

impl ProcessState {
    /// Combine sanitized setpoints with the controller's actuation.
    pub fn actuated(sp: &Setpoints, actuation: &ControllerState) -> Self {
        Self {
            flow: sp.flow,
            contamination: sp.contamination,
            ozone: actuation.ozone,
            contact: actuation.contact,
            temp: sp.temp,
            ph: sp.ph,
        }
    }
}

/// One tick's output vector. Immutable once returned.
///
/// `temp`/`ph` are the possibly-perturbed values the model actually used, so
/// status logic downstream stays consistent with what was modeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessMetrics {
    /// Disinfection quality, percent.
    pub quality: f64,
    /// Residual ozone, mg/L.
    pub residual: f64,
    /// Treatment efficiency ratio.
    pub efficiency: f64,
    /// Specific energy use, kWh/m³.
    pub energy: f64,
    /// Oxidation-reduction potential, mV.
    pub orp: f64,
    /// UV254 absorbance indicator.
    pub uv254: f64,
    /// Temperature as modeled, °C.
    pub temp: f64,
    /// pH as modeled.
    pub ph: f64,
}

/// Evaluate the oxidation model for one tick.
///
/// The caller guarantees `state.flow` and `state.contamination` are strictly
/// positive (see `Setpoints::sanitized`); with that, every output is finite
/// and within its documented range.
pub fn evaluate(cfg: &ProcessCfg, state: &ProcessState, disturbance: &Disturbance) -> ProcessMetrics {
    let temp = state.temp + disturbance.temp_offset;
    let ph = state.ph + disturbance.ph_offset;
    let pressure = disturbance.pressure;

    let temperature_factor = (1.0 - (temp - cfg.temp_optimum).abs() * cfg.temp_slope)
        .clamp(cfg.temp_factor_min, cfg.temp_factor_max);
    let ph_factor = (1.0 - (ph - cfg.ph_optimum).abs() * cfg.ph_slope)
        .clamp(cfg.ph_factor_min, cfg.ph_factor_max);
    let mixing = ((state.ozone / (state.flow * cfg.mixing_flow_coeff)) * cfg.mixing_gain)
        .clamp(cfg.mixing_min, cfg.mixing_max);

    let oxidation = (state.ozone * state.contact * mixing * temperature_factor * ph_factor
        * pressure
        / (state.contamination * cfg.demand_coeff))
        .clamp(0.0, cfg.oxidation_cap);

    let quality = (oxidation * 100.0).clamp(QUALITY_MIN, QUALITY_MAX);
    let residual = ((state.ozone / state.flow) * RESIDUAL_DOSE_COEFF
        - oxidation * RESIDUAL_OXIDATION_CREDIT)
        .clamp(0.0, RESIDUAL_MAX);
    let efficiency = (oxidation * EFFICIENCY_OXIDATION_WEIGHT + mixing * EFFICIENCY_MIXING_WEIGHT)
        .clamp(EFFICIENCY_MIN, EFFICIENCY_MAX);
    let energy = (state.ozone * ENERGY_OZONE_COEFF + state.flow * ENERGY_FLOW_COEFF + ENERGY_BASE)
        .clamp(ENERGY_MIN, ENERGY_MAX);
    let orp = (ORP_BASE + oxidation * ORP_OXIDATION_GAIN
        - state.contamination * ORP_CONTAMINATION_LOSS)
        .clamp(ORP_MIN, ORP_MAX);
    let uv254 = (UV_BASE + state.contamination / UV_CONTAMINATION_DIV
        - oxidation * UV_OXIDATION_GAIN)
        .clamp(UV_MIN, UV_MAX);

    tracing::trace!(oxidation, quality, residual, "process step");

    ProcessMetrics {
        quality,
        residual,
        efficiency,
        energy,
        orp,
        uv254,
        temp,
        ph,
    }
}
