//! The simulation state machine: one atomic tick per call.
//!
//! `Simulation` owns the two carried-state items (the actuated dose pair and
//! the trend history) plus the collaborator seams. Each `tick()` runs the
//! controller step followed by the process step, synchronously; the caller
//! decides cadence (see `runner`).

use std::marker::PhantomData;

use crate::config::{ControlCfg, NoiseCfg, ProcessCfg};
use crate::controller::{self, ControllerState};
use crate::error::{BuildError, Result};
use crate::history::HistoryBuffer;
use crate::mocks::NullEventSink;
use crate::noise::{Disturbance, SeededNoise};
use crate::process::{self, ProcessMetrics, ProcessState};
use crate::setpoints::Setpoints;
use crate::status::WaterStatus;
use ozone_traits::{EventSink, NoiseSource, TrendPoint, TrendSink};

/// Everything one tick produced.
#[derive(Debug, Clone, Copy)]
pub struct TickReport {
    /// 1-based tick counter.
    pub tick: u64,
    /// Actuation applied this tick (also the new controller state).
    pub actuation: ControllerState,
    pub metrics: ProcessMetrics,
    pub status: WaterStatus,
}

/// Closed-loop simulation instance.
pub struct Simulation {
    control: ControlCfg,
    process: ProcessCfg,
    noise_cfg: NoiseCfg,
    setpoints: Setpoints,
    state: ControllerState,
    history: HistoryBuffer,
    noise: Box<dyn NoiseSource>,
    events: Box<dyn EventSink>,
    disturbance: bool,
    scenario: Option<String>,
    ticks: u64,
}

impl Simulation {
    /// Start building a simulation; initial setpoints are mandatory.
    pub fn builder() -> SimulationBuilder<Missing> {
        SimulationBuilder::default()
    }

    /// One atomic, non-reentrant tick: sanitize inputs, close the loop from
    /// history, actuate, model, record.
    pub fn tick(&mut self) -> TickReport {
        let sp = self.setpoints.sanitized(&self.control);
        let feedback = self.history.feedback();

        let actuation = controller::step(&self.control, &sp, &feedback, self.state);
        self.state = actuation;

        let state = ProcessState::actuated(&sp, &actuation);
        let disturbance = if self.disturbance {
            Disturbance::draw(self.noise.as_mut(), &self.noise_cfg)
        } else {
            Disturbance::NOMINAL
        };
        let metrics = process::evaluate(&self.process, &state, &disturbance);
        let status = WaterStatus::derive(&metrics);

        self.history.push(TrendPoint {
            quality: metrics.quality,
            residual: metrics.residual,
            energy: metrics.energy,
            flow: state.flow,
            orp: metrics.orp,
            uv254: metrics.uv254,
        });
        self.ticks += 1;

        tracing::debug!(
            tick = self.ticks,
            ozone = actuation.ozone,
            contact = actuation.contact,
            quality = metrics.quality,
            residual = metrics.residual,
            "tick complete"
        );

        TickReport {
            tick: self.ticks,
            actuation,
            metrics,
            status,
        }
    }

    /// Replace the operator setpoints; takes effect on the next tick
    /// (latest value wins, no coalescing of intermediate edits).
    pub fn set_setpoints(&mut self, sp: Setpoints) {
        self.setpoints = sp;
    }

    pub fn setpoints(&self) -> &Setpoints {
        &self.setpoints
    }

    /// Apply a named preset onto the setpoints and announce it.
    pub fn apply_scenario(&mut self, scenario: &ozone_config::Scenario) {
        self.setpoints = Setpoints::from(scenario);
        self.scenario = Some(scenario.label.clone());
        self.events
            .log(&format!("Scenario applied: {}", scenario.label));
        tracing::info!(scenario = %scenario.name, "scenario applied");
    }

    /// Toggle disturbance injection; announces transitions only.
    pub fn set_disturbance(&mut self, on: bool) {
        if self.disturbance != on {
            self.disturbance = on;
            self.events.log(if on {
                "Disturbance injection enabled."
            } else {
                "Disturbance injection disabled."
            });
        }
    }

    pub fn disturbance(&self) -> bool {
        self.disturbance
    }

    /// Clear the trend history and re-seat the actuators at the current
    /// requested setpoints.
    pub fn reset(&mut self) {
        self.history.clear();
        self.state = ControllerState::from_setpoints(&self.setpoints.sanitized(&self.control));
        self.ticks = 0;
        self.events.log("State reset to current setpoints.");
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn controller_state(&self) -> ControllerState {
        self.state
    }

    pub fn active_scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The event sink, for callers that announce run-level transitions
    /// (start/stop, throttled disturbance notices).
    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }
}

impl core::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Simulation")
            .field("ticks", &self.ticks)
            .field("state", &self.state)
            .field("disturbance", &self.disturbance)
            .field("history_len", &self.history.len())
            .finish()
    }
}

// Type-state markers for the builder
pub struct Missing;
pub struct Set;

/// Builder for `Simulation`; validated on `build()`.
pub struct SimulationBuilder<S> {
    setpoints: Option<Setpoints>,
    control: Option<ControlCfg>,
    process: Option<ProcessCfg>,
    noise_cfg: Option<NoiseCfg>,
    history_capacity: Option<usize>,
    noise: Option<Box<dyn NoiseSource>>,
    events: Option<Box<dyn EventSink>>,
    disturbance: bool,
    _s: PhantomData<S>,
}

impl Default for SimulationBuilder<Missing> {
    fn default() -> Self {
        Self {
            setpoints: None,
            control: None,
            process: None,
            noise_cfg: None,
            history_capacity: None,
            noise: None,
            events: None,
            disturbance: false,
            _s: PhantomData,
        }
    }
}

/// Chainable setters that do not affect type-state.
impl<S> SimulationBuilder<S> {
    pub fn with_control(mut self, control: ControlCfg) -> Self {
        self.control = Some(control);
        self
    }
    pub fn with_process(mut self, process: ProcessCfg) -> Self {
        self.process = Some(process);
        self
    }
    pub fn with_noise_cfg(mut self, noise_cfg: NoiseCfg) -> Self {
        self.noise_cfg = Some(noise_cfg);
        self
    }
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }
    pub fn with_noise_source(mut self, noise: impl NoiseSource + 'static) -> Self {
        self.noise = Some(Box::new(noise));
        self
    }
    pub fn with_event_sink(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Some(Box::new(events));
        self
    }
    pub fn with_disturbance(mut self, on: bool) -> Self {
        self.disturbance = on;
        self
    }

    /// Fallible build available in any type-state; returns a typed
    /// `BuildError` for missing or inconsistent pieces.
    pub fn try_build(self) -> Result<Simulation> {
        let setpoints = self
            .setpoints
            .ok_or_else(|| eyre::Report::new(BuildError::MissingSetpoints))?;

        let control = self.control.unwrap_or_default();
        let process = self.process.unwrap_or_default();
        let noise_cfg = self.noise_cfg.unwrap_or_default();
        let capacity = self.history_capacity.unwrap_or(120);

        if !(control.ozone_min < control.ozone_max) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "ozone range must satisfy min < max",
            )));
        }
        if !(control.contact_min < control.contact_max) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "contact range must satisfy min < max",
            )));
        }
        if !(control.ozone_ramp > 0.0) || !(control.contact_ramp > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "ramp limits must be > 0",
            )));
        }
        if !(process.demand_coeff > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "demand_coeff must be > 0",
            )));
        }
        if !(process.mixing_flow_coeff > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "mixing_flow_coeff must be > 0",
            )));
        }
        if capacity == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "history capacity must be >= 1",
            )));
        }
        for hw in [
            noise_cfg.temp_half_width,
            noise_cfg.ph_half_width,
            noise_cfg.pressure_half_width,
        ] {
            if !hw.is_finite() || hw < 0.0 {
                return Err(eyre::Report::new(BuildError::InvalidConfig(
                    "noise half-widths must be finite and >= 0",
                )));
            }
        }

        let noise = self
            .noise
            .unwrap_or_else(|| Box::new(SeededNoise::from_entropy()));
        let events = self.events.unwrap_or_else(|| Box::new(NullEventSink));

        // Actuators start seated at the requested values so the first tick
        // ramps from the operating point, not from zero. Seat from the
        // sanitized copy: a non-finite request must not poison the ramp.
        let state = ControllerState::from_setpoints(&setpoints.sanitized(&control));

        Ok(Simulation {
            control,
            process,
            noise_cfg,
            setpoints,
            state,
            history: HistoryBuffer::new(capacity),
            noise,
            events,
            disturbance: self.disturbance,
            scenario: None,
            ticks: 0,
        })
    }
}

impl SimulationBuilder<Missing> {
    /// Provide the initial operator setpoints (mandatory).
    pub fn with_setpoints(self, setpoints: Setpoints) -> SimulationBuilder<Set> {
        SimulationBuilder {
            setpoints: Some(setpoints),
            control: self.control,
            process: self.process,
            noise_cfg: self.noise_cfg,
            history_capacity: self.history_capacity,
            noise: self.noise,
            events: self.events,
            disturbance: self.disturbance,
            _s: PhantomData,
        }
    }
}

impl SimulationBuilder<Set> {
    /// Validate and build; only available once setpoints are provided.
    pub fn build(self) -> Result<Simulation> {
        self.try_build()
    }
}
