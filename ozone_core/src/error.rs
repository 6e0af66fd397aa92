use thiserror::Error;

/// Errors raised while assembling a `Simulation`.
///
/// The tick path itself never fails: out-of-range inputs are clamped and all
/// outputs are bounded, so errors only exist at build/config time.
#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing initial setpoints")]
    MissingSetpoints,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
