//! Errors for the core value types.
//!
//! Sub-crates wrap `SteerError` as one variant of their own enum.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SteerError {
    #[error("time step must be finite and positive (got {0})")]
    InvalidTimeStep(f32),

    #[error("world bounds must be finite and positive (got {width} × {height})")]
    InvalidBounds { width: f32, height: f32 },
}

/// Shorthand result type for the `steer-*` crates.
pub type SteerResult<T> = Result<T, SteerError>;
