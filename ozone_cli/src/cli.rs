//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "ozone", version, about = "Ozone disinfection loop simulator")]
pub struct Cli {
    /// Path to config TOML; defaults apply when the file does not exist
    #[arg(long, value_name = "FILE", default_value = "etc/ozone.toml")]
    pub config: PathBuf,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the closed-loop simulation
    Run {
        /// Stop after this many ticks (runs until Ctrl-C when omitted)
        #[arg(long)]
        ticks: Option<u64>,
        /// Apply a named scenario preset before the first tick
        #[arg(long)]
        scenario: Option<String>,
        /// Enable disturbance injection
        #[arg(long, action = ArgAction::SetTrue)]
        disturbance: bool,
        /// Seed the disturbance noise source for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Override tick cadence in milliseconds
        #[arg(long = "tick-ms", value_name = "MS")]
        tick_ms: Option<u64>,
        /// Override trend history capacity
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// List the available scenario presets
    Scenarios,
    /// Build a simulation with defaults, run a few ticks, and report OK
    SelfCheck,
}
