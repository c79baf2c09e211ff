//! Corona Particles Core (engine-agnostic)
//!
//! A point cloud shaped like a glowing sphere whose particles flare out
//! toward a moving anchor (usually the camera). Positions and scales are a
//! pure function of the fixed origins, per-particle coefficients, the anchor
//! and a small set of [`FieldConstants`]; nothing carries over between frames.

pub mod constants;
pub mod error;
pub mod field;
pub mod sampling;

// Re-exports for consumers (adapters)
pub use constants::{FieldConstants, PROFILE_NAMES};
pub use error::FieldError;
pub use field::{displace, planar_distance, Displaced, ParticleField, Point3};
pub use sampling::{seeded_rng, sphere_samples};
