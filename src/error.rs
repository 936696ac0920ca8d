// src/error.rs

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can stop a cost evaluation or a simulation run.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The inputs describe a network that cannot be evaluated
    /// (no served city, no active facility, zero trials, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Service level outside the accepted 80.0 - 99.9 % band.
    #[error("service level {0}% is outside the accepted range 80.0 - 99.9%")]
    InvalidServiceLevel(f64),

    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("unknown facility: {0}")]
    UnknownFacility(String),

    /// Demand distribution could not be built from the given parameters.
    #[error("invalid demand distribution: {0}")]
    Distribution(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
