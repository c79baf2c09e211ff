//! Per-concern drivers owned by the [`SceneController`](crate::SceneController).
//!
//! Each is built whole from a loaded scene so a failed load never leaves one
//! half-configured.

pub mod particles;
pub mod timeline;

pub use particles::FieldController;
pub use timeline::TimelineController;
