use bevy::prelude::*;

use corona_scene::{
    BloomSettings, EventSource, Frame, LoadedScene, PointLight, Renderer, SubscriptionId,
    SubscriptionKind,
};

/// A loaded scene waiting to be handed to the controller. Removed once consumed.
#[derive(Resource, Debug, Clone)]
pub struct PendingScene(pub LoadedScene);

/// Last frame submitted by the controller, staged for the apply system
/// (keeps ordering explicit: Compute -> Apply).
#[derive(Resource, Debug, Default)]
pub struct StagedFrame {
    pub positions: Vec<[f32; 3]>,
    pub scales: Vec<f32>,
    /// Buffers changed and the mesh must be rewritten.
    pub dirty: bool,
    pub track_times: Vec<(String, f32)>,
    pub lights: Vec<PointLight>,
    pub bloom: BloomSettings,
    pub aspect: f32,
    pub frames: u64,
}

impl Renderer for StagedFrame {
    fn submit(&mut self, frame: &Frame<'_>) {
        if frame.buffers_dirty {
            self.positions.clear();
            self.positions.extend(
                frame
                    .positions
                    .chunks_exact(3)
                    .map(|xyz| [xyz[0], xyz[1], xyz[2]]),
            );
            self.scales.clear();
            self.scales.extend_from_slice(frame.scales);
            self.dirty = true;
        }
        self.track_times.clear();
        self.track_times
            .extend(frame.track_times.iter().map(|t| (t.name.clone(), t.time)));
        self.lights.clear();
        self.lights.extend_from_slice(frame.lights);
        self.bloom = frame.bloom;
        self.aspect = frame.aspect;
        self.frames += 1;
    }
}

/// Bevy events are always delivered, so subscriptions are only a ledger
/// telling systems whether the controller still listens.
#[derive(Resource, Debug, Default)]
pub struct SceneSubscriptions {
    next: u32,
    pub live: Vec<(SubscriptionId, SubscriptionKind)>,
}

impl SceneSubscriptions {
    pub fn listens(&self, kind: SubscriptionKind) -> bool {
        self.live.iter().any(|(_, k)| *k == kind)
    }
}

impl EventSource for SceneSubscriptions {
    fn subscribe(&mut self, kind: SubscriptionKind) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.live.push((id, kind));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.live.retain(|(live, _)| *live != id);
    }
}
