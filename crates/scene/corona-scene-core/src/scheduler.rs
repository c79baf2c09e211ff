use corona_particles_core::Point3;

use crate::external::{Frame, Renderer};
use crate::SceneController;

/// One unit of per-frame work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pass {
    /// A progress sample: timeline, then field, then submit.
    Progress(f32),
    /// A render tick carrying the latest anchor: field, then submit.
    Tick(Point3),
}

/// Run one pass against an active scene and submit exactly one frame.
///
/// The field is recomputed on every pass from the current anchor, so a
/// progress sample also re-derives positions (the anchor is itself usually
/// animated by the camera clip).
pub(crate) fn run_pass(scene: &mut SceneController, pass: Pass, renderer: &mut dyn Renderer) {
    match pass {
        Pass::Progress(p) => scene.timeline.on_progress(p),
        Pass::Tick(anchor) => scene.particles.set_anchor(anchor),
    }
    scene.particles.update();

    let buffers_dirty = scene.particles.field_mut().take_dirty();
    let field = scene.particles.field();
    let frame = Frame {
        positions: field.positions_flat(),
        scales: field.scales(),
        buffers_dirty,
        track_times: scene.timeline.track_times(),
        anchor: scene.particles.anchor(),
        lights: &scene.lights,
        bloom: scene.config.bloom,
        aspect: scene.viewport.aspect(),
    };
    renderer.submit(&frame);
}
