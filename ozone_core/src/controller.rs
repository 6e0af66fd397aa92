//! Feedforward/feedback dose controller with slew-limited actuation.
//!
//! The controller is a pure function: it takes the current setpoints, the
//! previous tick's outcome, and the previously actuated values, and returns
//! the new actuated pair. There is no hidden state; the caller carries the
//! returned `ControllerState` to the next tick.

use crate::config::ControlCfg;
use crate::setpoints::{FeedbackSample, Setpoints};
use crate::util::ramp_toward;

/// The last actuated ozone dose and contact time.
///
/// Doubles as the actuation command for the tick that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Actuated ozone dose, mg/h.
    pub ozone: f64,
    /// Actuated contact time, minutes.
    pub contact: f64,
}

impl ControllerState {
    /// Seat the actuators at the operator-requested values; used at startup
    /// and on reset so the first tick ramps from the requested point.
    pub fn from_setpoints(sp: &Setpoints) -> Self {
        Self {
            ozone: sp.ozone,
            contact: sp.contact,
        }
    }
}

/// Raw ozone dose demand before range clamping and slew limiting.
///
/// Feedforward rises with contaminant and hydraulic load; feedback adds dose
/// proportionally to the quality shortfall; the residual guard subtracts a
/// flat step while unreacted ozone is already high.
pub fn ozone_target(cfg: &ControlCfg, sp: &Setpoints, feedback: &FeedbackSample) -> f64 {
    let feedforward = sp.contamination * cfg.contamination_gain + sp.flow * cfg.flow_gain;
    let quality_correction = (100.0 - feedback.quality) * cfg.quality_gain;
    let residual_correction = if feedback.residual > cfg.residual_guard {
        -cfg.residual_step
    } else {
        0.0
    };
    feedforward + quality_correction + residual_correction
}

/// Raw contact-time demand before range clamping and slew limiting.
///
/// Heavier contaminant loads ask for more contact; higher flow shortens the
/// achievable residence time in the contact basin.
pub fn contact_target(cfg: &ControlCfg, sp: &Setpoints) -> f64 {
    cfg.contact_base + sp.contamination / cfg.contact_load_div
        - (sp.flow - cfg.contact_flow_ref) / cfg.contact_flow_div
}

/// One controller evaluation: demand, clamp, slew-limit, re-clamp.
///
/// The returned state is both the actuation for this tick and the prior
/// state for the next one.
pub fn step(
    cfg: &ControlCfg,
    sp: &Setpoints,
    feedback: &FeedbackSample,
    prior: ControllerState,
) -> ControllerState {
    let ozone_demand = ozone_target(cfg, sp, feedback).clamp(cfg.ozone_min, cfg.ozone_max);
    let ozone = ramp_toward(prior.ozone, ozone_demand, cfg.ozone_ramp)
        .clamp(cfg.ozone_min, cfg.ozone_max);

    let contact_demand = contact_target(cfg, sp).clamp(cfg.contact_min, cfg.contact_max);
    let contact = ramp_toward(prior.contact, contact_demand, cfg.contact_ramp)
        .clamp(cfg.contact_min, cfg.contact_max);

    tracing::trace!(
        ozone_demand,
        ozone,
        contact_demand,
        contact,
        "controller step"
    );

    ControllerState { ozone, contact }
}
