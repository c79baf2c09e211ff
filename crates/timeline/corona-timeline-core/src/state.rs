//! Output contracts from the synchronizer.
//!
//! Track times are exposed as an ordered slice (cheap, what renderers consume
//! each frame) and as a name-keyed snapshot for tooling and adapters.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::TrackId;
use crate::track::TrackTarget;

/// Current playback time for one track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackTime {
    pub id: TrackId,
    pub name: String,
    pub target: TrackTarget,
    /// Playback time in seconds.
    pub time: f32,
}

/// Name-keyed snapshot of every track's playback time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    /// Sanitized progress the times were derived from.
    pub progress: f32,
    pub times: HashMap<String, f32>,
}

impl TimelineState {
    #[inline]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.times.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl<'a> FromIterator<&'a TrackTime> for TimelineState {
    fn from_iter<I: IntoIterator<Item = &'a TrackTime>>(iter: I) -> Self {
        Self {
            progress: 0.0,
            times: iter
                .into_iter()
                .map(|t| (t.name.clone(), t.time))
                .collect(),
        }
    }
}
