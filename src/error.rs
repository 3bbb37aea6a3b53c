//! Validation errors raised by the rule engine.

use thiserror::Error;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Malformed input rejected before any rule runs.
///
/// None of these describe a runtime or environment failure; each one is a
/// contract violation by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A registry entry has an empty name.
    #[error("device name must not be empty")]
    EmptyDeviceName,

    /// A registry entry has priority 0.
    #[error("device \"{device}\" has priority {priority}, must be >= 1")]
    InvalidPriority { device: String, priority: u32 },

    /// The comfort band has `low > high`.
    #[error("temperature range is inverted: low {low} > high {high}")]
    InvertedTemperatureRange { low: f64, high: f64 },

    /// Usage so far is below zero.
    #[error("energy used today must be >= 0, got {0}")]
    NegativeUsage(f64),

    /// Usage budget is below zero.
    #[error("energy usage limit must be >= 0, got {0}")]
    NegativeBudget(f64),

    /// A numeric input is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}
