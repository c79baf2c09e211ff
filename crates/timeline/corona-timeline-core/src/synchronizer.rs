//! TimelineSynchronizer: maps one progress value to playback time for every track.
//!
//! Methods:
//! - initialize (validate + allocate slots), on_progress (clamp → scale → per-track clamp),
//!   accessors for times and snapshots, clear

use log::{debug, warn};

use crate::error::TimelineError;
use crate::ids::{IdAllocator, TrackId};
use crate::progress;
use crate::state::{TimelineState, TrackTime};
use crate::track::TrackSpec;

/// Keeps a fixed set of tracks in lock-step with an external progress signal.
///
/// Every track is driven from the same `reference_duration`; a track authored
/// shorter than the reference is clamped to its own end rather than stretched.
#[derive(Debug, Default)]
pub struct TimelineSynchronizer {
    ids: IdAllocator,
    specs: Vec<TrackSpec>,
    // Parallel to `specs`; handed to renderers as one slice.
    times: Vec<TrackTime>,
    reference_duration: f32,
    progress: f32,
    initialized: bool,
    // Latched after the first invalid progress warning.
    warned_invalid: bool,
}

impl TimelineSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the tracks to drive. Replaces any previously initialized set.
    pub fn initialize(
        &mut self,
        tracks: Vec<TrackSpec>,
        reference_duration: f32,
    ) -> Result<(), TimelineError> {
        if !reference_duration.is_finite() || reference_duration <= 0.0 {
            return Err(TimelineError::track_config(format!(
                "reference duration must be > 0 (got {reference_duration})"
            )));
        }
        if tracks.is_empty() {
            return Err(TimelineError::track_config("track list is empty"));
        }
        for spec in &tracks {
            spec.validate()?;
        }

        self.clear();
        self.reference_duration = reference_duration;
        for spec in &tracks {
            self.times.push(TrackTime {
                id: self.ids.alloc_track(),
                name: spec.name.clone(),
                target: spec.target,
                time: 0.0,
            });
        }
        self.specs = tracks;
        self.initialized = true;
        debug!(
            "timeline initialized with {} tracks, reference duration {}",
            self.specs.len(),
            reference_duration
        );
        Ok(())
    }

    /// Set every track's time from one progress sample.
    ///
    /// `p` is clamped into [0, 1] (NaN → 0) and the first invalid sample is
    /// logged. Calling twice with the same value leaves identical state.
    pub fn on_progress(&mut self, p: f32) {
        if !self.initialized {
            debug!("on_progress({p}) ignored: timeline not initialized");
            return;
        }
        let sanitized = progress::sanitize(p);
        if sanitized.was_invalid && !self.warned_invalid {
            warn!("invalid progress {p}; clamping to {}", sanitized.value);
            self.warned_invalid = true;
        }
        self.progress = sanitized.value;

        let t = sanitized.value * self.reference_duration;
        for (slot, spec) in self.times.iter_mut().zip(&self.specs) {
            slot.time = t.min(spec.duration);
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last sanitized progress value (0 before the first update).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn reference_duration(&self) -> f32 {
        self.reference_duration
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn time(&self, id: TrackId) -> Option<f32> {
        self.times.get(id.0 as usize).map(|slot| slot.time)
    }

    pub fn time_by_name(&self, name: &str) -> Option<f32> {
        self.times
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| slot.time)
    }

    /// Track times in load order.
    pub fn track_times(&self) -> &[TrackTime] {
        &self.times
    }

    pub fn specs(&self) -> &[TrackSpec] {
        &self.specs
    }

    /// Name-keyed snapshot of the current times.
    pub fn state(&self) -> TimelineState {
        let mut state: TimelineState = self.times.iter().collect();
        state.progress = self.progress;
        state
    }

    /// Forget all tracks and return to the uninitialized state.
    pub fn clear(&mut self) {
        self.ids.reset();
        self.specs.clear();
        self.times.clear();
        self.reference_duration = 0.0;
        self.progress = 0.0;
        self.initialized = false;
    }
}
