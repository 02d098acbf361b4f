//! Error types for FlowField.

use thiserror::Error;

/// Main error type for FlowField operations.
#[derive(Error, Debug)]
pub enum FlowFieldError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed, empty or mis-shaped image data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parameters that cannot produce a meaningful result (non-positive
    /// sigmas, degenerate kernels, zero sampling stride).
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Image codec error: {0}")]
    Image(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlowFieldError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Result type alias for FlowField operations.
pub type Result<T> = std::result::Result<T, FlowFieldError>;
