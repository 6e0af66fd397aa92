//! Operator setpoints and the feedback sample closing the control loop.

use crate::config::ControlCfg;
use crate::util::finite_or;

/// Smallest flow/contamination the process stage will ever see, m³/h and
/// mg/L. The oxidation index divides by both, so they are floored to a
/// strictly positive value during sanitization.
pub const MIN_FLOW: f64 = 0.1;
pub const MIN_CONTAMINATION: f64 = 0.1;

/// Upper sanitization bounds; generous compared to any plant scenario.
pub const MAX_FLOW: f64 = 500.0;
pub const MAX_CONTAMINATION: f64 = 200.0;
pub const TEMP_RANGE: (f64, f64) = (-5.0, 45.0);
pub const PH_RANGE: (f64, f64) = (4.0, 10.0);

/// The six operator-set inputs.
///
/// Owned and mutated by the front-end (sliders, scenario presets); the core
/// reads a sanitized copy at each tick. The value present at tick time wins;
/// intermediate edits are not queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoints {
    /// Hydraulic load, m³/h.
    pub flow: f64,
    /// Contaminant load, mg/L.
    pub contamination: f64,
    /// Requested ozone dose, mg/h.
    pub ozone: f64,
    /// Requested contact time, minutes.
    pub contact: f64,
    /// Water temperature, °C.
    pub temp: f64,
    /// Water pH.
    pub ph: f64,
}

impl Default for Setpoints {
    /// Nominal plant operating point.
    fn default() -> Self {
        Self {
            flow: 65.0,
            contamination: 22.0,
            ozone: 120.0,
            contact: 14.0,
            temp: 18.0,
            ph: 7.2,
        }
    }
}

impl Setpoints {
    /// Return a copy safe for the control and process stages: non-finite
    /// fields fall back to the nominal operating point, flow and
    /// contamination are floored to a strictly positive minimum, and the
    /// dose/contact requests are pulled into their actuation ranges.
    pub fn sanitized(&self, control: &ControlCfg) -> Self {
        let nominal = Self::default();
        Self {
            flow: finite_or(self.flow, nominal.flow).clamp(MIN_FLOW, MAX_FLOW),
            contamination: finite_or(self.contamination, nominal.contamination)
                .clamp(MIN_CONTAMINATION, MAX_CONTAMINATION),
            ozone: finite_or(self.ozone, nominal.ozone).clamp(control.ozone_min, control.ozone_max),
            contact: finite_or(self.contact, nominal.contact)
                .clamp(control.contact_min, control.contact_max),
            temp: finite_or(self.temp, nominal.temp).clamp(TEMP_RANGE.0, TEMP_RANGE.1),
            ph: finite_or(self.ph, nominal.ph).clamp(PH_RANGE.0, PH_RANGE.1),
        }
    }
}

impl From<&ozone_config::Scenario> for Setpoints {
    fn from(s: &ozone_config::Scenario) -> Self {
        Self {
            flow: s.flow,
            contamination: s.contamination,
            ozone: s.ozone,
            contact: s.contact,
            temp: s.temp,
            ph: s.ph,
        }
    }
}

/// The previous tick's measured outcome, fed back into the controller.
///
/// Derived by the caller from the newest history entry; the default is used
/// on the very first tick when no history exists yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackSample {
    /// Disinfection quality, percent.
    pub quality: f64,
    /// Residual ozone, mg/L.
    pub residual: f64,
}

impl Default for FeedbackSample {
    fn default() -> Self {
        Self {
            quality: 90.0,
            residual: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_floors_divisors() {
        let cfg = ControlCfg::default();
        let sp = Setpoints {
            flow: 0.0,
            contamination: -3.0,
            ..Setpoints::default()
        };
        let s = sp.sanitized(&cfg);
        assert_eq!(s.flow, MIN_FLOW);
        assert_eq!(s.contamination, MIN_CONTAMINATION);
    }

    #[test]
    fn sanitized_replaces_non_finite_with_nominal() {
        let cfg = ControlCfg::default();
        let sp = Setpoints {
            temp: f64::NAN,
            ph: f64::INFINITY,
            ..Setpoints::default()
        };
        let s = sp.sanitized(&cfg);
        assert_eq!(s.temp, Setpoints::default().temp);
        assert_eq!(s.ph, Setpoints::default().ph);
    }

    #[test]
    fn sanitized_pulls_requests_into_actuation_ranges() {
        let cfg = ControlCfg::default();
        let sp = Setpoints {
            ozone: 1000.0,
            contact: 1.0,
            ..Setpoints::default()
        };
        let s = sp.sanitized(&cfg);
        assert_eq!(s.ozone, cfg.ozone_max);
        assert_eq!(s.contact, cfg.contact_min);
    }
}
