//! Seams to the host: scene loading, event subscription and rendering.
//!
//! The controller never talks to a window, a GPU or an asset server directly.
//! Hosts implement these traits (the wasm and Bevy adapters do) and tests use
//! recording mocks.

use serde::{Deserialize, Serialize};

use corona_particles_core::Point3;
use corona_timeline_core::{TrackSpec, TrackTime};

use crate::config::BloomSettings;
use crate::error::SceneError;
use crate::lights::PointLight;

/// A named node of the loaded scene graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub position: Point3,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, position: Point3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// What a [`SceneLoader`] hands back once the asset is parsed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedScene {
    /// Animation clips in asset order.
    pub tracks: Vec<TrackSpec>,
    /// Vertex positions of the base mesh the field is built from.
    #[serde(default)]
    pub base_samples: Vec<Point3>,
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
}

impl LoadedScene {
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        serde_json::from_str(text).map_err(|err| SceneError::Load {
            reason: err.to_string(),
        })
    }
}

/// Asynchronous asset loading lives outside the core; the controller only
/// sees the finished result.
pub trait SceneLoader {
    fn load(&mut self, path: &str) -> Result<LoadedScene, SceneError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionKind {
    /// Scroll (or any other) progress samples.
    Progress,
    /// Per-frame render loop callback.
    FrameTick,
    /// Surface size changes.
    Resize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

/// Where progress, frame and resize callbacks come from.
pub trait EventSource {
    fn subscribe(&mut self, kind: SubscriptionKind) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Everything a renderer needs for one frame, borrowed from the controller.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// xyz triples, one per particle.
    pub positions: &'a [f32],
    pub scales: &'a [f32],
    /// Set when the position/scale buffers changed since the last frame.
    pub buffers_dirty: bool,
    pub track_times: &'a [TrackTime],
    pub anchor: Point3,
    /// Empty when the light rig is disabled.
    pub lights: &'a [PointLight],
    pub bloom: BloomSettings,
    pub aspect: f32,
}

pub trait Renderer {
    fn submit(&mut self, frame: &Frame<'_>);
}
