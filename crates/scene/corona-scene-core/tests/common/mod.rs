#![allow(dead_code)]

use corona_scene::{
    EventSource, Frame, LoadedScene, Point3, Renderer, SceneError, SceneLoader, SceneNode,
    SubscriptionId, SubscriptionKind, TrackSpec,
};

/// Hands out ids in order and remembers which are still live.
#[derive(Default)]
pub struct RecordingSource {
    next: u32,
    pub live: Vec<(SubscriptionId, SubscriptionKind)>,
    pub unsubscribed: Vec<SubscriptionId>,
}

impl EventSource for RecordingSource {
    fn subscribe(&mut self, kind: SubscriptionKind) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.live.push((id, kind));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.live.retain(|(live, _)| *live != id);
        self.unsubscribed.push(id);
    }
}

/// Owned copy of a submitted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub positions: Vec<f32>,
    pub scales: Vec<f32>,
    pub buffers_dirty: bool,
    pub times: Vec<(String, f32)>,
    pub anchor: Point3,
    pub light_count: usize,
    pub aspect: f32,
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<CapturedFrame>,
}

impl RecordingRenderer {
    pub fn last(&self) -> &CapturedFrame {
        self.frames.last().expect("at least one frame submitted")
    }
}

impl Renderer for RecordingRenderer {
    fn submit(&mut self, frame: &Frame<'_>) {
        self.frames.push(CapturedFrame {
            positions: frame.positions.to_vec(),
            scales: frame.scales.to_vec(),
            buffers_dirty: frame.buffers_dirty,
            times: frame
                .track_times
                .iter()
                .map(|t| (t.name.clone(), t.time))
                .collect(),
            anchor: frame.anchor,
            light_count: frame.lights.len(),
            aspect: frame.aspect,
        });
    }
}

/// Serves one prepared scene, or a load error.
pub struct FixedLoader(pub Result<LoadedScene, SceneError>);

impl SceneLoader for FixedLoader {
    fn load(&mut self, _path: &str) -> Result<LoadedScene, SceneError> {
        self.0.clone()
    }
}

/// Two 6 s clips, a ring of samples, the camera and all three light proxies.
pub fn small_scene() -> LoadedScene {
    let base_samples = (0..32)
        .map(|i| {
            let a = i as f32 / 32.0 * std::f32::consts::TAU;
            Point3::new(a.cos(), 0.0, a.sin())
        })
        .collect();
    LoadedScene {
        tracks: vec![
            TrackSpec::camera("CameraAction", 6.0),
            TrackSpec::new("ChairAction", 6.0),
        ],
        base_samples,
        nodes: vec![
            SceneNode::new("Camera", Point3::new(0.0, 0.0, -35.0)),
            SceneNode::new("lightProxy_01", Point3::new(2.0, 1.0, 0.0)),
            SceneNode::new("lightProxy_02", Point3::new(-2.0, 1.0, 0.0)),
            SceneNode::new("lightProxy_03", Point3::new(0.0, 3.0, 0.0)),
        ],
    }
}
