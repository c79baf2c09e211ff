//! Light rig: proxy nodes in the loaded scene become point lights.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use corona_particles_core::Point3;

use crate::config::LightProxy;
use crate::error::SceneError;
use crate::external::SceneNode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub node: String,
    pub position: Point3,
    /// Linear RGB in [0, 1].
    pub color: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
}

/// Split a 0xRRGGBB value into linear channel fractions.
pub fn color_channels(hex: u32) -> [f32; 3] {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    [r, g, b]
}

/// Name lookup over the loaded scene's nodes. The first node wins on duplicates.
#[derive(Debug, Default)]
pub struct NodeIndex {
    positions: HashMap<String, Point3>,
}

impl NodeIndex {
    pub fn build(nodes: &[SceneNode]) -> Self {
        let mut positions = HashMap::with_capacity(nodes.len());
        for node in nodes {
            positions.entry(node.name.clone()).or_insert(node.position);
        }
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<Point3> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Resolve every proxy against the scene.
///
/// All proxies must be present; the first missing one is reported and the
/// rig is left for the caller to disable.
pub fn resolve_rig(proxies: &[LightProxy], index: &NodeIndex) -> Result<Vec<PointLight>, SceneError> {
    proxies
        .iter()
        .map(|proxy| {
            let position = index
                .position(&proxy.node)
                .ok_or_else(|| SceneError::asset_missing(&proxy.node))?;
            Ok(PointLight {
                node: proxy.node.clone(),
                position,
                color: color_channels(proxy.color),
                intensity: proxy.intensity,
                distance: proxy.distance,
            })
        })
        .collect()
}
