//! Error types for scene setup and lifecycle

use serde::{Deserialize, Serialize};

use corona_particles_core::FieldError;
use corona_timeline_core::TimelineError;

use crate::controller::SceneState;

/// Errors surfaced by [`SceneController`](crate::SceneController).
///
/// Only setup and lifecycle calls return these. Per-frame work clamps and
/// continues instead of failing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SceneError {
    /// Timeline could not be configured from the loaded tracks
    #[error(transparent)]
    TrackConfigInvalid(#[from] TimelineError),

    /// A named scene object is absent from the loaded scene
    #[error("Scene object not found: {name}")]
    AssetMissing { name: String },

    /// Particle field construction failed (or degraded, for empty geometry)
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Lifecycle call made from the wrong state
    #[error("Invalid scene transition: {from:?} -> {to:?}")]
    InvalidTransition { from: SceneState, to: SceneState },

    /// Configuration rejected before any loading started
    #[error("Invalid scene config: {reason}")]
    InvalidConfig { reason: String },

    /// The external loader failed
    #[error("Scene load failed: {reason}")]
    Load { reason: String },
}

impl SceneError {
    pub fn asset_missing(name: impl Into<String>) -> Self {
        Self::AssetMissing { name: name.into() }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether the scene can keep running with the affected feature disabled.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AssetMissing { .. } => true,
            Self::Field(err) => err.is_recoverable(),
            _ => false,
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TrackConfigInvalid(err) => err.category(),
            Self::AssetMissing { .. } | Self::Load { .. } => "asset",
            Self::Field(err) => err.category(),
            Self::InvalidTransition { .. } => "lifecycle",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
