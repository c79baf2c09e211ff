//! Field constants and per-scene profiles.
//!
//! Scene variants differ only in these numbers. Each profile is tuned on its
//! own; the divisors and sign patterns are not meant to agree with each other.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Constants for one [`ParticleField::update`](crate::ParticleField::update) call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConstants {
    /// Planar distance below which particles flare.
    pub boundary_distance: f32,
    /// Depth push at zero distance, before the particle's own coefficient.
    pub max_displacement: f32,
    /// Added to each origin's height before measuring against the anchor.
    #[serde(default)]
    pub height_offset: f32,
    /// Depth push per unit of render scale.
    pub scale_divisor: f32,
    /// Inclusive `[min, max]` render scale.
    pub scale_range: [f32; 2],
    /// Per-axis sign applied to the displacement (`x`, `y`, `z`), each ±1.
    #[serde(default = "unit_signs")]
    pub axis_signs: [f32; 3],
}

fn unit_signs() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Names accepted by [`FieldConstants::profile`].
pub const PROFILE_NAMES: [&str; 3] = ["corona", "halo", "ember"];

impl FieldConstants {
    /// Main sun body: wide flare, gentle scale ramp.
    pub fn corona() -> Self {
        Self {
            boundary_distance: 10.0,
            max_displacement: 20.0,
            height_offset: 0.0,
            scale_divisor: 2.0,
            scale_range: [1.0, 6.0],
            axis_signs: unit_signs(),
        }
    }

    /// Tight ring around the body; vertical flare flipped downward.
    pub fn halo() -> Self {
        Self {
            boundary_distance: 6.0,
            max_displacement: 8.0,
            height_offset: 1.5,
            scale_divisor: 3.0,
            scale_range: [0.5, 4.0],
            axis_signs: [1.0, -1.0, 1.0],
        }
    }

    /// Sparse embers thrown far, lateral flare mirrored, scale barely changes.
    pub fn ember() -> Self {
        Self {
            boundary_distance: 14.0,
            max_displacement: 40.0,
            height_offset: -2.0,
            scale_divisor: 20.0,
            scale_range: [1.0, 3.0],
            axis_signs: [-1.0, 1.0, 1.0],
        }
    }

    pub fn profile(name: &str) -> Option<Self> {
        match name {
            "corona" => Some(Self::corona()),
            "halo" => Some(Self::halo()),
            "ember" => Some(Self::ember()),
            _ => None,
        }
    }

    /// Check the constants can drive an update.
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |reason: String| Err(FieldError::InvalidConstants { reason });

        let [min, max] = self.scale_range;
        let scalars = [
            ("boundary_distance", self.boundary_distance),
            ("max_displacement", self.max_displacement),
            ("height_offset", self.height_offset),
            ("scale_divisor", self.scale_divisor),
            ("scale_range.min", min),
            ("scale_range.max", max),
        ];
        if let Some((name, v)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite (got {v})"));
        }
        if self.boundary_distance <= 0.0 {
            return invalid(format!(
                "boundary_distance must be > 0 (got {})",
                self.boundary_distance
            ));
        }
        if self.scale_divisor <= 0.0 {
            return invalid(format!(
                "scale_divisor must be > 0 (got {})",
                self.scale_divisor
            ));
        }
        if min < 0.0 || min > max {
            return invalid(format!("scale_range must satisfy 0 <= min <= max (got [{min}, {max}])"));
        }
        if let Some(sign) = self.axis_signs.iter().find(|s| s.abs() != 1.0) {
            return invalid(format!("axis_signs entries must be 1 or -1 (got {sign})"));
        }
        Ok(())
    }
}

impl Default for FieldConstants {
    fn default() -> Self {
        Self::corona()
    }
}
