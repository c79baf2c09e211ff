use log::info;

use corona_particles_core::{FieldConstants, FieldError, ParticleField, Point3};

use crate::config::SceneConfig;
use crate::diagnostics::SetupReport;
use crate::error::SceneError;

/// Owns the particle field, its constants and the current anchor.
#[derive(Debug, Default)]
pub struct FieldController {
    field: ParticleField,
    constants: FieldConstants,
    anchor: Point3,
}

impl FieldController {
    /// An inert field: no particles, updates do nothing.
    pub fn inert(constants: FieldConstants, anchor: Point3) -> Self {
        Self {
            field: ParticleField::inert(),
            constants,
            anchor,
        }
    }

    /// Build the field from base samples and compute its first frame.
    ///
    /// Empty geometry degrades to an inert field and is reported; any other
    /// field error fails the load.
    pub fn load(
        config: &SceneConfig,
        constants: FieldConstants,
        base_samples: &[Point3],
        anchor: Point3,
        report: &mut SetupReport,
    ) -> Result<Self, SceneError> {
        let field = match ParticleField::initialize_seeded(
            base_samples,
            config.jitter_amplitude,
            config.reference_radius,
            config.seed,
        ) {
            Ok(field) => field,
            Err(FieldError::EmptyGeometry) => {
                report.warn(FieldError::EmptyGeometry.into());
                ParticleField::inert()
            }
            Err(err) => return Err(err.into()),
        };
        info!("particle field ready: {} particles", field.len());
        report.particle_count = field.len();

        let mut ctl = Self {
            field,
            constants,
            anchor,
        };
        ctl.update();
        Ok(ctl)
    }

    /// Recompute positions and scales for the current anchor.
    #[inline]
    pub fn update(&mut self) {
        self.field.update(self.anchor, &self.constants);
    }

    #[inline]
    pub fn set_anchor(&mut self, anchor: Point3) {
        self.anchor = anchor;
    }

    #[inline]
    pub fn anchor(&self) -> Point3 {
        self.anchor
    }

    #[inline]
    pub fn constants(&self) -> &FieldConstants {
        &self.constants
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub(crate) fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn release(&mut self) {
        self.field.dispose();
    }
}
