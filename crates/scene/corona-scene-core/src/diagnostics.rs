use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Outcome of a successful `finish_load`.
///
/// Recoverable problems (missing nodes, empty geometry) land here instead of
/// failing the load; the affected feature is switched off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupReport {
    pub warnings: Vec<SceneError>,
    pub track_count: usize,
    pub particle_count: usize,
    pub lights_enabled: bool,
}

impl SetupReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn warn(&mut self, err: SceneError) {
        log::warn!("scene setup degraded ({}): {err}", err.category());
        self.warnings.push(err);
    }
}
