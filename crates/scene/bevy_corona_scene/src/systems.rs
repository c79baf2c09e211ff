use bevy::prelude::*;
use bevy::render::mesh::MeshVertexAttribute;
use bevy::render::render_resource::VertexFormat;
use log::{info, warn};

use corona_scene::{Point3, SceneState, SubscriptionKind};

use crate::components::{CoronaAnchor, CoronaParticles};
use crate::resources::{PendingScene, SceneSubscriptions, StagedFrame};
use crate::{CoronaScene, ScrollProgress, ViewportResized};

/// Per-vertex render scale written next to the positions.
pub const ATTRIBUTE_PARTICLE_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Corona_ParticleScale", 988_540_917, VertexFormat::Float32);

/// Consume a [`PendingScene`]: load it into the controller and activate.
/// Exclusive so the pending scene can be moved out of the world.
pub fn finish_pending_scene_system(world: &mut World) {
    let Some(PendingScene(loaded)) = world.remove_resource::<PendingScene>() else {
        return;
    };
    world.resource_scope(|world, mut scene: Mut<CoronaScene>| {
        // A failed load leaves the controller `Loading`; retries skip `begin_load`.
        if scene.0.state() == SceneState::Unloaded {
            if let Err(err) = scene.0.begin_load("pending") {
                warn!("pending scene rejected: {err}");
                return;
            }
        }
        let report = match scene.0.finish_load(loaded) {
            Ok(report) => report,
            Err(err) => {
                warn!("scene load failed: {err}");
                return;
            }
        };
        info!(
            "corona scene loaded: {} tracks, {} particles, {} warnings",
            report.track_count,
            report.particle_count,
            report.warnings.len()
        );
        let mut subs = world.resource_mut::<SceneSubscriptions>();
        if let Err(err) = scene.0.activate(&mut *subs) {
            warn!("scene activation failed: {err}");
        }
    });
}

/// Forward scroll progress to the controller.
pub fn scroll_progress_system(
    mut events: EventReader<ScrollProgress>,
    subs: Res<SceneSubscriptions>,
    mut scene: ResMut<CoronaScene>,
    mut staged: ResMut<StagedFrame>,
) {
    if !subs.listens(SubscriptionKind::Progress) {
        events.clear();
        return;
    }
    for ScrollProgress(p) in events.read() {
        scene.0.on_progress(*p, &mut *staged);
    }
}

/// Tick the field from the anchor entity's world position once per frame.
pub fn anchor_tick_system(
    anchors: Query<&GlobalTransform, With<CoronaAnchor>>,
    subs: Res<SceneSubscriptions>,
    mut scene: ResMut<CoronaScene>,
    mut staged: ResMut<StagedFrame>,
) {
    if !subs.listens(SubscriptionKind::FrameTick) {
        return;
    }
    let Some(anchor) = anchors.iter().next() else {
        return;
    };
    // Bevy's glam and the core's glam are distinct types; go through arrays.
    let anchor = Point3::from_array(anchor.translation().to_array());
    scene.0.tick(anchor, &mut *staged);
}

pub fn viewport_resize_system(
    mut events: EventReader<ViewportResized>,
    subs: Res<SceneSubscriptions>,
    mut scene: ResMut<CoronaScene>,
) {
    if !subs.listens(SubscriptionKind::Resize) {
        events.clear();
        return;
    }
    if let Some(last) = events.read().last() {
        scene.0.resize(last.width, last.height);
    }
}

/// Write staged buffers into every [`CoronaParticles`] mesh when they changed.
pub fn apply_frame_system(
    mut staged: ResMut<StagedFrame>,
    particles: Query<&Handle<Mesh>, With<CoronaParticles>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
) {
    if !staged.dirty {
        return;
    }
    let Some(mut meshes) = meshes else {
        return;
    };
    for handle in particles.iter() {
        if let Some(mesh) = meshes.get_mut(handle) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, staged.positions.clone());
            mesh.insert_attribute(ATTRIBUTE_PARTICLE_SCALE, staged.scales.clone());
        }
    }
    staged.dirty = false;
}

/// Release the controller's subscriptions and buffers when the app exits.
pub fn dispose_on_exit_system(
    mut exits: EventReader<AppExit>,
    mut scene: ResMut<CoronaScene>,
    mut subs: ResMut<SceneSubscriptions>,
) {
    if exits.read().next().is_some() {
        scene.0.dispose(&mut *subs);
    }
}
