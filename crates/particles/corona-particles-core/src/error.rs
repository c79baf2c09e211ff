//! Error types for particle field construction

use serde::{Deserialize, Serialize};

/// Construction-time failures. `update` never fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FieldError {
    /// No base samples to build a field from
    #[error("Base geometry has no samples")]
    EmptyGeometry,

    /// Origin and coefficient buffers disagree on particle count
    #[error("Buffer size mismatch: {origins} origins vs {coefficients} coefficients")]
    BufferSizeMismatch { origins: usize, coefficients: usize },

    /// Radius or jitter outside the usable range
    #[error("Invalid geometry parameters: {reason}")]
    InvalidGeometry { reason: String },

    /// Field constants that cannot drive an update
    #[error("Invalid field constants: {reason}")]
    InvalidConstants { reason: String },
}

impl FieldError {
    /// Whether a scene can continue with an inert field instead of failing.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyGeometry)
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyGeometry | Self::InvalidGeometry { .. } => "geometry",
            Self::BufferSizeMismatch { .. } => "buffer",
            Self::InvalidConstants { .. } => "validation",
        }
    }
}
