//! # Error Module
//!
//! One error type for the whole crate. Configuration problems are reported at load
//! time, numerical problems (divergence, out-of-range saturation) only when the
//! post-step validation is switched on.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Missing data: {0}")]
    MissingData(String),
    /// NaN or Inf appeared in the state
    #[error("Non-finite saturation {value} at step {step}, cell {index}")]
    Divergence { step: usize, index: usize, value: f64 },
    #[error("Saturation {value} outside [0, 1] at step {step}, cell {index}")]
    OutOfRange { step: usize, index: usize, value: f64 },
    #[error("Trajectory shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    /// stored trajectory was computed with other constants
    #[error("Stale trajectory: {0}")]
    StaleTrajectory(String),
}
