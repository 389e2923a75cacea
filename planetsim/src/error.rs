//! Crate-wide error type
//!
//! Nothing in the simulation is fatal to the interactive loop. These errors
//! are returned to the caller (the viewer, the run loop or a test) which logs
//! them and carries on.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration or control parameter
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Body with non-positive or non-finite mass/radius, or non-finite state
    #[error("invalid body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    /// Body index outside the registry
    #[error("no body at index {0}")]
    UnknownBody(usize),

    /// Time step that is non-finite, negative or larger than the accepted frame delta
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// Renderer could not produce a frame
    #[error("render failed: {0}")]
    Render(String),

    /// Scenario file could not be parsed
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
