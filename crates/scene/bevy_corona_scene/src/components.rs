use bevy::prelude::*;

/// Marker for the entity whose world position is the field anchor
/// (normally the camera). The first match is used.
#[derive(Component, Debug, Default)]
pub struct CoronaAnchor;

/// Marker for the point-list mesh entity that receives particle buffers.
#[derive(Component, Debug, Default)]
pub struct CoronaParticles;
