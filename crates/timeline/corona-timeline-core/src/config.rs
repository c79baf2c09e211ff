//! Core configuration for corona-timeline-core.

use serde::{Deserialize, Serialize};

/// Reference duration used when a scene does not specify one.
///
/// Scene clips are authored at 6 s; stopping just short of the end keeps a
/// clip on its last frame at full progress instead of wrapping to frame zero.
pub const DEFAULT_REFERENCE_DURATION: f32 = 5.999;

/// Timeline configuration shared by every track of a scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Seconds of playback that full progress (1.0) maps to.
    #[serde(default = "default_reference_duration")]
    pub reference_duration: f32,
}

fn default_reference_duration() -> f32 {
    DEFAULT_REFERENCE_DURATION
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            reference_duration: DEFAULT_REFERENCE_DURATION,
        }
    }
}
