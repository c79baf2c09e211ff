//! ParticleField: owned buffers plus the per-frame flare recomputation.
//!
//! Origins and coefficients are fixed at construction. `update` rewrites the
//! position and scale buffers in place from those inputs alone, so calling it
//! twice with the same anchor leaves exactly the same buffers.

use glam::Vec3;
use log::debug;
use rand::Rng;

use crate::constants::FieldConstants;
use crate::error::FieldError;
use crate::sampling;

/// Point in scene space.
pub type Point3 = Vec3;

/// One particle's recomputed state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Displaced {
    pub position: Point3,
    /// Outward depth push before axis signs (0 when outside the boundary).
    pub push: f32,
    pub scale: f32,
}

/// Planar distance from an origin to the anchor over the depth/height plane.
/// The lateral (x) axis does not contribute.
#[inline]
pub fn planar_distance(origin: Point3, anchor: Point3, height_offset: f32) -> f32 {
    let dz = origin.z - anchor.z;
    let dy = origin.y + height_offset - anchor.y;
    (dz * dz + dy * dy).sqrt()
}

/// Pure per-particle kernel behind [`ParticleField::update`].
///
/// Inside the boundary the particle is pushed along depth away from the body
/// centre, scaled by its depth coefficient magnitude; its x/y offsets are its
/// x/y coefficients times that same push. At or beyond the boundary (or for a
/// NaN distance) the origin is returned unchanged.
#[inline]
pub fn displace(
    origin: Point3,
    coefficient: Point3,
    anchor: Point3,
    constants: &FieldConstants,
) -> Displaced {
    let boundary = constants.boundary_distance;
    let dis = planar_distance(origin, anchor, constants.height_offset);

    if dis < boundary {
        let push = constants.max_displacement * (boundary - dis) / boundary * coefficient.z.abs();
        let outward = if origin.z < 0.0 { -1.0 } else { 1.0 };
        let [sx, sy, sz] = constants.axis_signs;
        let position = Point3::new(
            origin.x + coefficient.x * push * sx,
            origin.y + coefficient.y * push * sy,
            origin.z + outward * push * sz,
        );
        Displaced {
            position,
            push,
            scale: clamp_scale(push / constants.scale_divisor, constants.scale_range),
        }
    } else {
        Displaced {
            position: origin,
            push: 0.0,
            scale: clamp_scale(0.0, constants.scale_range),
        }
    }
}

// Unlike f32::clamp this never panics on an inverted range.
#[inline]
fn clamp_scale(raw: f32, [min, max]: [f32; 2]) -> f32 {
    raw.max(min).min(max)
}

/// A point cloud whose visible positions flare toward a moving anchor.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    origins: Vec<Point3>,
    coefficients: Vec<Point3>,
    positions: Vec<[f32; 3]>,
    scales: Vec<f32>,
    dirty: bool,
}

impl ParticleField {
    /// A field with no particles. Updates are no-ops.
    pub fn inert() -> Self {
        Self::default()
    }

    /// Sample origins from base geometry and draw per-particle coefficients.
    ///
    /// Each sample is jittered by up to `jitter_amplitude` per axis and then
    /// rescaled onto the sphere of `reference_radius`, which keeps the spread
    /// even despite the jitter.
    pub fn initialize<R: Rng + ?Sized>(
        base_samples: &[Point3],
        jitter_amplitude: f32,
        reference_radius: f32,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        if base_samples.is_empty() {
            return Err(FieldError::EmptyGeometry);
        }
        if !reference_radius.is_finite() || reference_radius <= 0.0 {
            return Err(FieldError::InvalidGeometry {
                reason: format!("reference radius must be > 0 (got {reference_radius})"),
            });
        }
        if !jitter_amplitude.is_finite() || jitter_amplitude < 0.0 {
            return Err(FieldError::InvalidGeometry {
                reason: format!("jitter amplitude must be >= 0 (got {jitter_amplitude})"),
            });
        }

        let origins =
            sampling::jitter_onto_sphere(base_samples, jitter_amplitude, reference_radius, rng);
        let coefficients = sampling::draw_coefficients(origins.len(), rng);
        debug!(
            "particle field initialized: {} particles on radius {}",
            origins.len(),
            reference_radius
        );
        Self::from_buffers(origins, coefficients)
    }

    /// [`initialize`](Self::initialize) with an RNG built from `seed`
    /// (`None` → entropy, see [`sampling::seeded_rng`]).
    pub fn initialize_seeded(
        base_samples: &[Point3],
        jitter_amplitude: f32,
        reference_radius: f32,
        seed: Option<u64>,
    ) -> Result<Self, FieldError> {
        let mut rng = sampling::seeded_rng(seed);
        Self::initialize(base_samples, jitter_amplitude, reference_radius, &mut rng)
    }

    /// Build a field from explicit origin and coefficient buffers.
    ///
    /// Outputs start at the origins with zero scale and are marked dirty.
    pub fn from_buffers(
        origins: Vec<Point3>,
        coefficients: Vec<Point3>,
    ) -> Result<Self, FieldError> {
        if origins.len() != coefficients.len() {
            return Err(FieldError::BufferSizeMismatch {
                origins: origins.len(),
                coefficients: coefficients.len(),
            });
        }
        let positions = origins.iter().map(|o| o.to_array()).collect();
        let scales = vec![0.0; origins.len()];
        Ok(Self {
            origins,
            coefficients,
            positions,
            scales,
            dirty: true,
        })
    }

    /// Recompute every particle's position and scale for `anchor`.
    ///
    /// Stateless: the result depends only on the fixed buffers, `anchor` and
    /// `constants`. Writes in place and marks the outputs dirty.
    pub fn update(&mut self, anchor: Point3, constants: &FieldConstants) {
        if self.origins.is_empty() {
            return;
        }
        let inputs = self.origins.iter().zip(&self.coefficients);
        let outputs = self.positions.iter_mut().zip(self.scales.iter_mut());
        for ((origin, coefficient), (position, scale)) in inputs.zip(outputs) {
            let d = displace(*origin, *coefficient, anchor, constants);
            *position = d.position.to_array();
            *scale = d.scale;
        }
        self.dirty = true;
    }

    /// Release all buffers; the field becomes inert.
    pub fn dispose(&mut self) {
        *self = Self::inert();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// True for a field without particles (built by `inert` or disposed).
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    pub fn origins(&self) -> &[Point3] {
        &self.origins
    }

    #[inline]
    pub fn coefficients(&self) -> &[Point3] {
        &self.coefficients
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Positions as `x, y, z, x, y, z, ...` for GPU upload.
    #[inline]
    pub fn positions_flat(&self) -> &[f32] {
        self.positions.as_flattened()
    }

    #[inline]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it (called once the renderer re-uploaded).
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
