#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and scenario presets for the ozone treatment simulator.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Scenario presets are pure data: named full sets of operator setpoints,
//!   applied by the front-end before the next tick. The four presets the
//!   plant operators use daily are built in; extra ones can be declared in
//!   the TOML under `[[scenario]]`.
use serde::Deserialize;

/// Tick-loop pacing and retention knobs.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SimulationCfg {
    /// Tick cadence in milliseconds.
    pub tick_ms: u64,
    /// Bounded trend history capacity (oldest evicted first).
    pub history_capacity: usize,
    /// Minimum spacing between repeated disturbance notices, in ms.
    pub event_throttle_ms: u64,
}

impl Default for SimulationCfg {
    fn default() -> Self {
        Self {
            tick_ms: 900,
            history_capacity: 120,
            event_throttle_ms: 7_000,
        }
    }
}

/// Dosing controller gains, actuation ranges, and slew limits.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ControlCfg {
    /// Feedforward gain on contaminant load (mg/h per mg/L).
    pub contamination_gain: f64,
    /// Feedforward gain on hydraulic load (mg/h per m³/h).
    pub flow_gain: f64,
    /// Feedback gain on the quality shortfall below 100 %.
    pub quality_gain: f64,
    /// Residual level above which dosing is pulled back.
    pub residual_guard: f64,
    /// Flat dose reduction applied while the residual guard is tripped.
    pub residual_step: f64,
    /// Absolute ozone actuation range, mg/h.
    pub ozone_min: f64,
    pub ozone_max: f64,
    /// Maximum ozone actuation change per tick, mg/h.
    pub ozone_ramp: f64,
    /// Contact-time demand curve: base + load/load_div - (flow - flow_ref)/flow_div.
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

/// Oxidation model coefficients open to tuning.
///
/// The clamp bounds of the derived metrics are plausibility limits, not
/// tuning knobs, and stay as constants in the core.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ProcessCfg {
    /// Water temperature at which oxidation efficiency peaks, °C.
    pub temp_optimum: f64,
    /// Efficiency penalty per °C away from the optimum.
    pub temp_slope: f64,
    /// pH at which oxidation efficiency peaks.
    pub ph_optimum: f64,
    /// Efficiency penalty per pH unit away from the optimum.
    pub ph_slope: f64,
    /// Flow normalization coefficient in the ozone-to-water contact ratio.
    pub mixing_flow_coeff: f64,
    /// Gain applied to the normalized contact ratio.
    pub mixing_gain: f64,
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
            ph_optimum: 7.2,
            ph_slope: 0.1,
            mixing_flow_coeff: 1.4,
            mixing_gain: 0.9,
            demand_coeff: 42.0,
            oxidation_cap: 1.4,
        }
    }
}

/// Half-widths of the uniform disturbance noise per perturbed field.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
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

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

/// A named full set of operator setpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct Scenario {
    /// Lookup key, e.g. "nominal".
    pub name: String,
    /// Human-readable label shown in the status line and event log.
    pub label: String,
    pub flow: f64,
    pub contamination: f64,
    pub ozone: f64,
    pub contact: f64,
    pub temp: f64,
    pub ph: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationCfg,
    pub control: ControlCfg,
    pub process: ProcessCfg,
    pub noise: NoiseCfg,
    pub logging: Logging,
    /// Extra scenario presets; looked up before the built-in set.
    #[serde(rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// The four presets shipped with the simulator.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "nominal".into(),
            label: "Nominal operation".into(),
            flow: 65.0,
            contamination: 22.0,
            ozone: 120.0,
            contact: 14.0,
            temp: 18.0,
            ph: 7.2,
        },
        Scenario {
            name: "peak".into(),
            label: "Peak contaminant load".into(),
            flow: 75.0,
            contamination: 55.0,
            ozone: 180.0,
            contact: 20.0,
            temp: 19.0,
            ph: 7.0,
        },
        Scenario {
            name: "cold".into(),
            label: "Cold water mode".into(),
            flow: 58.0,
            contamination: 30.0,
            ozone: 150.0,
            contact: 18.0,
            temp: 8.0,
            ph: 7.4,
        },
        Scenario {
            name: "shock".into(),
            label: "Hydraulic shock".into(),
            flow: 110.0,
            contamination: 26.0,
            ozone: 170.0,
            contact: 10.0,
            temp: 16.0,
            ph: 7.1,
        },
    ]
}

impl Config {
    /// Look up a scenario by name: TOML-declared presets first, then the
    /// built-in set.
    pub fn resolve_scenario(&self, name: &str) -> Option<Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .or_else(|| builtin_scenarios().into_iter().find(|s| s.name == name))
    }

    pub fn validate(&self) -> eyre::Result<()> {
        // Simulation
        if self.simulation.tick_ms == 0 {
            eyre::bail!("simulation.tick_ms must be >= 1");
        }
        if self.simulation.history_capacity == 0 {
            eyre::bail!("simulation.history_capacity must be >= 1");
        }

        // Control
        let c = &self.control;
        for (v, name) in [
            (c.contamination_gain, "control.contamination_gain"),
            (c.flow_gain, "control.flow_gain"),
            (c.quality_gain, "control.quality_gain"),
        ] {
            if !v.is_finite() || v < 0.0 {
                eyre::bail!("{name} must be finite and >= 0");
            }
        }
        if !c.residual_step.is_finite() || c.residual_step < 0.0 {
            eyre::bail!("control.residual_step must be finite and >= 0");
        }
        if !(c.ozone_min.is_finite() && c.ozone_max.is_finite()) || c.ozone_min >= c.ozone_max {
            eyre::bail!("control ozone range must satisfy ozone_min < ozone_max");
        }
        if !c.ozone_ramp.is_finite() || c.ozone_ramp <= 0.0 {
            eyre::bail!("control.ozone_ramp must be > 0");
        }
        if !(c.contact_min.is_finite() && c.contact_max.is_finite())
            || c.contact_min >= c.contact_max
        {
            eyre::bail!("control contact range must satisfy contact_min < contact_max");
        }
        if !c.contact_ramp.is_finite() || c.contact_ramp <= 0.0 {
            eyre::bail!("control.contact_ramp must be > 0");
        }
        if c.contact_load_div == 0.0 || c.contact_flow_div == 0.0 {
            eyre::bail!("control contact divisors must be non-zero");
        }

        // Process
        let p = &self.process;
        if !p.temp_slope.is_finite() || p.temp_slope < 0.0 {
            eyre::bail!("process.temp_slope must be finite and >= 0");
        }
        if !p.ph_slope.is_finite() || p.ph_slope < 0.0 {
            eyre::bail!("process.ph_slope must be finite and >= 0");
        }
        if !p.mixing_flow_coeff.is_finite() || p.mixing_flow_coeff <= 0.0 {
            eyre::bail!("process.mixing_flow_coeff must be > 0");
        }
        if !p.demand_coeff.is_finite() || p.demand_coeff <= 0.0 {
            eyre::bail!("process.demand_coeff must be > 0");
        }
        if !p.oxidation_cap.is_finite() || p.oxidation_cap <= 0.0 {
            eyre::bail!("process.oxidation_cap must be > 0");
        }

        // Noise
        let n = &self.noise;
        for (v, name) in [
            (n.temp_half_width, "noise.temp_half_width"),
            (n.ph_half_width, "noise.ph_half_width"),
            (n.pressure_half_width, "noise.pressure_half_width"),
        ] {
            if !v.is_finite() || v < 0.0 {
                eyre::bail!("{name} must be finite and >= 0");
            }
        }
        // A pressure swing of 1.0 would allow a zero factor; keep it well below.
        if n.pressure_half_width >= 1.0 {
            eyre::bail!("noise.pressure_half_width must be < 1.0");
        }

        // Scenarios
        for s in &self.scenarios {
            if s.name.trim().is_empty() {
                eyre::bail!("scenario.name must be non-empty");
            }
            if !s.flow.is_finite() || s.flow <= 0.0 {
                eyre::bail!("scenario '{}': flow must be > 0", s.name);
            }
            if !s.contamination.is_finite() || s.contamination <= 0.0 {
                eyre::bail!("scenario '{}': contamination must be > 0", s.name);
            }
        }

        Ok(())
    }
}
