use log::info;

use corona_timeline_core::{TimelineConfig, TimelineSynchronizer, TrackSpec, TrackTarget, TrackTime};

use crate::diagnostics::SetupReport;
use crate::error::SceneError;

/// Owns the synchronizer for the loaded clips.
#[derive(Debug, Default)]
pub struct TimelineController {
    sync: TimelineSynchronizer,
}

impl TimelineController {
    /// Initialize the timeline from loaded clips.
    ///
    /// With `camera_track` set, that clip alone drives the camera group; a
    /// name absent from the scene keeps the authored targets and is reported.
    pub fn load(
        config: &TimelineConfig,
        mut tracks: Vec<TrackSpec>,
        camera_track: Option<&str>,
        report: &mut SetupReport,
    ) -> Result<Self, SceneError> {
        if let Some(name) = camera_track {
            if tracks.iter().any(|t| t.name == name) {
                for track in &mut tracks {
                    track.target = if track.name == name {
                        TrackTarget::Camera
                    } else {
                        TrackTarget::Scene
                    };
                }
            } else {
                report.warn(SceneError::asset_missing(name));
            }
        }

        let mut sync = TimelineSynchronizer::new();
        sync.initialize(tracks, config.reference_duration)?;
        info!(
            "timeline ready: {} tracks over {}s",
            sync.len(),
            sync.reference_duration()
        );
        report.track_count = sync.len();
        Ok(Self { sync })
    }

    #[inline]
    pub fn on_progress(&mut self, p: f32) {
        self.sync.on_progress(p);
    }

    #[inline]
    pub fn track_times(&self) -> &[TrackTime] {
        self.sync.track_times()
    }

    #[inline]
    pub fn synchronizer(&self) -> &TimelineSynchronizer {
        &self.sync
    }

    pub fn release(&mut self) {
        self.sync.clear();
    }
}
