//! Runtime configuration structs for the simulation engine.
//!
//! These are the in-memory knobs used by the controller and process model.
//! They are separate from the TOML-deserialized schema in `ozone_config`;
//! `conversions` bridges the two.

/// Dosing controller gains, actuation ranges, and slew limits.
#[derive(Debug, Clone, Copy)]
pub struct ControlCfg {
    /// Feedforward gain on contaminant load (mg/h demanded per mg/L).
    pub contamination_gain: f64,
    /// Feedforward gain on hydraulic load (mg/h demanded per m³/h).
    pub flow_gain: f64,
    /// Feedback gain on the quality shortfall below 100 %.
    pub quality_gain: f64,
    /// Residual level (mg/L) above which dosing is pulled back.
    pub residual_guard: f64,
    /// Flat dose reduction (mg/h) applied while the residual guard is tripped.
    pub residual_step: f64,
    /// Absolute ozone actuation range, mg/h.
    pub ozone_min: f64,
    pub ozone_max: f64,
    /// Maximum ozone actuation change per tick, mg/h (either direction).
    pub ozone_ramp: f64,
    /// Contact-time demand curve:
    /// `base + contamination/load_div - (flow - flow_ref)/flow_div`.
    pub contact_base: f64,
    pub contact_load_div: f64,
    pub contact_flow_ref: f64,
    pub contact_flow_div: f64,
    /// Absolute contact-time actuation range, minutes.
    pub contact_min: f64,
    pub contact_max: f64,
    /// Maximum contact-time change per tick, minutes.
    pub contact_ramp: f64,
}

impl Default for ControlCfg {
    fn default() -> Self {
        Self {
            contamination_gain: 1.4,
            flow_gain: 0.4,
            quality_gain: 0.8,
            residual_guard: 0.5,
            residual_step: 20.0,
            ozone_min: 40.0,
            ozone_max: 280.0,
            ozone_ramp: 18.0,
            contact_base: 11.0,
            contact_load_div: 9.0,
            contact_flow_ref: 60.0,
            contact_flow_div: 22.0,
            contact_min: 6.0,
            contact_max: 32.0,
            contact_ramp: 2.0,
        }
    }
}

/// Oxidation model coefficients.
///
/// Each multiplicative factor is clamped independently before entering the
/// oxidation index, so a single extreme input cannot produce an unbounded
/// result. The derived-metric clamp bounds live as constants in `process`.
#[derive(Debug, Clone, Copy)]
pub struct ProcessCfg {
    /// Water temperature at which oxidation efficiency peaks, °C.
    pub temp_optimum: f64,
    /// Efficiency penalty per °C away from the optimum.
    pub temp_slope: f64,
    /// Temperature factor clamp range.
    pub temp_factor_min: f64,
    pub temp_factor_max: f64,
    /// pH at which oxidation efficiency peaks.
    pub ph_optimum: f64,
    /// Efficiency penalty per pH unit away from the optimum.
    pub ph_slope: f64,
    /// pH factor clamp range.
    pub ph_factor_min: f64,
    pub ph_factor_max: f64,
    /// Flow normalization coefficient in the ozone-to-water contact ratio.
    pub mixing_flow_coeff: f64,
    /// Gain applied to the normalized contact ratio.
    pub mixing_gain: f64,
    /// Mixing efficiency clamp range.
    pub mixing_min: f64,
    pub mixing_max: f64,
    /// Ozone demand per mg/L of contaminant in the oxidation denominator.
    pub demand_coeff: f64,
    /// Hard cap on the dimensionless oxidation index.
    pub oxidation_cap: f64,
}

impl Default for ProcessCfg {
    fn default() -> Self {
        Self {
            temp_optimum: 18.0,
            temp_slope: 0.018,
            temp_factor_min: 0.65,
            temp_factor_max: 1.15,
            ph_optimum: 7.2,
            ph_slope: 0.1,
            ph_factor_min: 0.55,
            ph_factor_max: 1.1,
            mixing_flow_coeff: 1.4,
            mixing_gain: 0.9,
            mixing_min: 0.35,
            mixing_max: 1.3,
            demand_coeff: 42.0,
            oxidation_cap: 1.4,
        }
    }
}

/// Half-widths of the uniform disturbance noise per perturbed field.
///
/// With the disturbance flag off these are ignored and the model sees the
/// nominal inputs exactly.
#[derive(Debug, Clone, Copy)]
pub struct NoiseCfg {
    /// Temperature jitter, ± °C.
    pub temp_half_width: f64,
    /// pH jitter, ± units.
    pub ph_half_width: f64,
    /// Pressure factor jitter, ± around 1.0.
    pub pressure_half_width: f64,
}

impl Default for NoiseCfg {
    fn default() -> Self {
        Self {
            temp_half_width: 0.4,
            ph_half_width: 0.06,
            pressure_half_width: 0.04,
        }
    }
}
