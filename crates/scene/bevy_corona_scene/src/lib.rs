//! Bevy adapter for the corona scene controller.
//!
//! Insert a [`PendingScene`] once the scene asset is parsed; the plugin loads
//! and activates it, feeds [`ScrollProgress`] events and the [`CoronaAnchor`]
//! transform into the controller, and writes particle buffers into the
//! [`CoronaParticles`] mesh.

use bevy::prelude::*;

use corona_scene::{SceneConfig, SceneController};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{CoronaAnchor, CoronaParticles};
pub use resources::{PendingScene, SceneSubscriptions, StagedFrame};
pub use systems::ATTRIBUTE_PARTICLE_SCALE;

#[derive(Resource, Debug)]
pub struct CoronaScene(pub SceneController);

/// Scroll progress sample, nominally in [0, 1].
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScrollProgress(pub f32);

/// Render surface size in pixels.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
}

/// Ordering of the plugin's per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoronaSet {
    Load,
    Compute,
    Apply,
}

/// # Panics
///
/// `build` panics when `config` fails validation.
#[derive(Default)]
pub struct CoronaScenePlugin {
    pub config: SceneConfig,
}

impl Plugin for CoronaScenePlugin {
    fn build(&self, app: &mut App) {
        let controller = SceneController::new(self.config.clone())
            .unwrap_or_else(|err| panic!("invalid corona scene config: {err}"));
        app.insert_resource(CoronaScene(controller))
            .init_resource::<StagedFrame>()
            .init_resource::<SceneSubscriptions>()
            .add_event::<ScrollProgress>()
            .add_event::<ViewportResized>()
            .configure_sets(
                Update,
                (CoronaSet::Load, CoronaSet::Compute, CoronaSet::Apply).chain(),
            )
            .add_systems(
                Update,
                (
                    systems::finish_pending_scene_system.in_set(CoronaSet::Load),
                    (
                        systems::viewport_resize_system,
                        systems::scroll_progress_system,
                        systems::anchor_tick_system,
                    )
                        .chain()
                        .in_set(CoronaSet::Compute),
                    systems::apply_frame_system.in_set(CoronaSet::Apply),
                ),
            )
            .add_systems(Last, systems::dispose_on_exit_system);
    }
}
