//! Track descriptors handed to the synchronizer.
//! Keyframe data stays with the external animation subsystem; the core only
//! needs a name, an authored duration and the object the track drives.

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Which scene object a track animates.
///
/// Camera clips and scene-root clips are played by separate mixers on the
/// host but must stay phase-locked to the same progress value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackTarget {
    Camera,
    #[default]
    Scene,
}

/// An animation track as authored: identifier plus duration in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub name: String,
    /// Authored clip length in seconds.
    pub duration: f32,
    #[serde(default)]
    pub target: TrackTarget,
}

impl TrackSpec {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            target: TrackTarget::Scene,
        }
    }

    pub fn camera(name: impl Into<String>, duration: f32) -> Self {
        Self {
            target: TrackTarget::Camera,
            ..Self::new(name, duration)
        }
    }

    /// Validate basic invariants (finite, strictly positive duration).
    pub fn validate(&self) -> Result<(), TimelineError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(TimelineError::track_config(format!(
                "track '{}' duration must be > 0 (got {})",
                self.name, self.duration
            )));
        }
        Ok(())
    }
}
