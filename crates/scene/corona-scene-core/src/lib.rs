//! corona-scene
//!
//! Engine-agnostic scene lifecycle: a loaded scene's clips are phase-locked
//! to one progress value, a particle field flares toward the anchor, and a
//! small light rig is resolved from proxy nodes. Hosts plug in through the
//! traits in [`external`] and receive a borrowed [`Frame`] per pass.

pub mod config;
pub mod controller;
pub mod controllers;
pub mod diagnostics;
pub mod error;
pub mod external;
pub mod lights;
pub mod scheduler;

pub use crate::config::{BloomSettings, FieldSpec, LightProxy, SceneConfig, Viewport};
pub use crate::controller::{SceneController, SceneState};
pub use crate::diagnostics::SetupReport;
pub use crate::error::SceneError;
pub use crate::external::{
    EventSource, Frame, LoadedScene, Renderer, SceneLoader, SceneNode, SubscriptionId,
    SubscriptionKind,
};
pub use crate::lights::PointLight;

// Re-exported so adapters need only this crate.
pub use corona_particles_core::{FieldConstants, FieldError, ParticleField, Point3};
pub use corona_timeline_core::{TrackSpec, TrackTarget, TrackTime};
