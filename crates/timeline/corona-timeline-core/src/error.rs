//! Error types for timeline synchronization

use serde::{Deserialize, Serialize};

/// Errors raised while configuring a [`TimelineSynchronizer`](crate::TimelineSynchronizer).
///
/// Only initialization can fail; progress updates clamp and continue.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineError {
    /// Bad reference duration, empty track list, or a non-positive track duration
    #[error("Invalid track configuration: {reason}")]
    TrackConfigInvalid { reason: String },
}

impl TimelineError {
    pub fn track_config(reason: impl Into<String>) -> Self {
        Self::TrackConfigInvalid {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TrackConfigInvalid { .. } => "validation",
        }
    }
}
