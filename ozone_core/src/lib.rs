#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Closed-loop ozone disinfection engine (presentation-agnostic).
//!
//! This crate provides the control-and-process simulation loop. Rendering,
//! charting and operator input all live behind the `ozone_traits` seams.
//!
//! ## Architecture
//!
//! - **Controller**: feedforward + feedback dose demand with slew-limited
//!   actuation (`controller` module)
//! - **Process model**: nonlinear oxidation index and derived water-quality
//!   metrics, every output clamped to a plausibility range (`process`)
//! - **Disturbance**: seedable uniform jitter on temperature/pH/pressure
//!   (`noise`)
//! - **History**: bounded FIFO trend buffer that also closes the feedback
//!   loop (`history`)
//! - **Simulation**: owns the carried state and sequences one tick:
//!   controller step, then process step (`sim`)
//! - **Runner**: paces ticks on a `Clock` with cooperative cancellation
//!   (`runner`)
//!
//! Every tick is a pure function of its inputs plus two carried-state items:
//! the last actuated dose pair and the newest history entry. With the
//! disturbance flag off the loop is bit-for-bit deterministic.

pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod history;
pub mod mocks;
pub mod noise;
pub mod process;
pub mod runner;
pub mod setpoints;
pub mod sim;
pub mod status;
pub mod util;

pub use config::{ControlCfg, NoiseCfg, ProcessCfg};
pub use controller::ControllerState;
pub use error::{BuildError, Result};
pub use history::HistoryBuffer;
pub use noise::{Disturbance, SeededNoise};
pub use process::{ProcessMetrics, ProcessState};
pub use runner::{RunCfg, RunSummary};
pub use setpoints::{FeedbackSample, Setpoints};
pub use sim::{Simulation, SimulationBuilder, TickReport};
pub use status::{LoopState, RiskLevel, SafetyState, WaterStatus};
