//! Corona Timeline Core (engine-agnostic)
//!
//! Drives a fixed set of animation tracks from one normalized scroll-progress
//! value instead of wall-clock time. Keyframes stay with the host's animation
//! system; this crate only decides what time every track should show.

pub mod config;
pub mod error;
pub mod ids;
pub mod progress;
pub mod state;
pub mod synchronizer;
pub mod track;

// Re-exports for consumers (adapters)
pub use config::{TimelineConfig, DEFAULT_REFERENCE_DURATION};
pub use error::TimelineError;
pub use ids::TrackId;
pub use progress::{sanitize as sanitize_progress, Progress};
pub use state::{TimelineState, TrackTime};
pub use synchronizer::TimelineSynchronizer;
pub use track::{TrackSpec, TrackTarget};
