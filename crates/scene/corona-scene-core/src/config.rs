//! Scene configuration.
//!
//! Everything that differs between scene variants lives here as data: the
//! field profile, timeline reference duration, light proxies and bloom.

use serde::{Deserialize, Serialize};

use corona_particles_core::{FieldConstants, Point3};
use corona_timeline_core::TimelineConfig;

use crate::error::SceneError;

/// Field constants given inline or by profile name (`"halo"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    Profile(String),
    Constants(FieldConstants),
}

impl FieldSpec {
    pub fn resolve(&self) -> Result<FieldConstants, SceneError> {
        let constants = match self {
            FieldSpec::Profile(name) => FieldConstants::profile(name)
                .ok_or_else(|| SceneError::invalid_config(format!("unknown field profile '{name}'")))?,
            FieldSpec::Constants(c) => c.clone(),
        };
        constants
            .validate()
            .map_err(|err| SceneError::invalid_config(err.to_string()))?;
        Ok(constants)
    }
}

impl Default for FieldSpec {
    fn default() -> Self {
        FieldSpec::Constants(FieldConstants::default())
    }
}

/// A named placeholder node that becomes a point light at its position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightProxy {
    pub node: String,
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
    /// Falloff distance; 0 means unbounded.
    pub distance: f32,
}

impl LightProxy {
    pub fn new(node: impl Into<String>, color: u32, intensity: f32, distance: f32) -> Self {
        Self {
            node: node.into(),
            color,
            intensity,
            distance,
        }
    }
}

fn default_lights() -> Vec<LightProxy> {
    vec![
        LightProxy::new("lightProxy_01", 0x7B8BD4, 4.0, 3.1),
        LightProxy::new("lightProxy_02", 0xFF9271, 0.1, 3.1),
        LightProxy::new("lightProxy_03", 0xFFE0DA, 4.0, 3.1),
    ]
}

/// Bloom pass parameters, forwarded to the renderer untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: 0.15,
            radius: 0.2,
            threshold: 0.8,
        }
    }
}

/// Render surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Width over height; 1.0 for a degenerate surface.
    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

fn default_jitter() -> f32 {
    0.05
}

fn default_radius() -> f32 {
    5.0
}

fn default_anchor_node() -> Option<String> {
    Some("Camera".to_string())
}

fn default_initial_anchor() -> Point3 {
    Point3::new(0.0, 0.0, -35.0)
}

/// Configuration for one scene, usually deserialized from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Per-axis jitter added to base samples before re-normalizing.
    #[serde(default = "default_jitter")]
    pub jitter_amplitude: f32,
    /// Radius of the sphere origins are snapped onto.
    #[serde(default = "default_radius")]
    pub reference_radius: f32,
    #[serde(default)]
    pub field: FieldSpec,
    #[serde(default)]
    pub timeline: TimelineConfig,
    /// Seed for jitter and coefficients; `None` draws fresh randomness.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Track retargeted to the camera group after loading, overriding the
    /// targets authored in the scene.
    #[serde(default)]
    pub camera_track: Option<String>,
    /// Scene node whose position is the initial anchor.
    #[serde(default = "default_anchor_node")]
    pub anchor_node: Option<String>,
    /// Anchor used until a node or tick provides one.
    #[serde(default = "default_initial_anchor")]
    pub initial_anchor: Point3,
    #[serde(default = "default_lights")]
    pub lights: Vec<LightProxy>,
    #[serde(default)]
    pub bloom: BloomSettings,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            jitter_amplitude: default_jitter(),
            reference_radius: default_radius(),
            field: FieldSpec::default(),
            timeline: TimelineConfig::default(),
            seed: None,
            camera_track: None,
            anchor_node: default_anchor_node(),
            initial_anchor: default_initial_anchor(),
            lights: default_lights(),
            bloom: BloomSettings::default(),
            viewport: Viewport::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate everything that can be checked before assets arrive and
    /// return the resolved field constants.
    ///
    /// The reference duration is checked when tracks are loaded.
    pub fn validate(&self) -> Result<FieldConstants, SceneError> {
        if !self.jitter_amplitude.is_finite() || self.jitter_amplitude < 0.0 {
            return Err(SceneError::invalid_config(format!(
                "jitter_amplitude must be >= 0 (got {})",
                self.jitter_amplitude
            )));
        }
        if !self.reference_radius.is_finite() || self.reference_radius <= 0.0 {
            return Err(SceneError::invalid_config(format!(
                "reference_radius must be > 0 (got {})",
                self.reference_radius
            )));
        }
        if !self.initial_anchor.is_finite() {
            return Err(SceneError::invalid_config("initial_anchor must be finite"));
        }
        if let Some(light) = self
            .lights
            .iter()
            .find(|l| !l.intensity.is_finite() || !l.distance.is_finite() || l.distance < 0.0)
        {
            return Err(SceneError::invalid_config(format!(
                "light '{}' needs finite intensity and distance >= 0",
                light.node
            )));
        }
        self.field.resolve()
    }
}
