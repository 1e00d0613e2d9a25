//! Atoll Core - scene layout and droplet-field logic
//!
//! This crate provides the renderer-independent pieces of the Atoll scene:
//! - The keep-clear zone around the central gazebo
//! - Rejection-sampled planting positions for the palm grove
//! - The drifting droplet field advanced once per animation tick

pub mod field;
pub mod placement;
pub mod zone;

pub use field::ParticleField;
pub use placement::{sample_outside, Bounds, LayoutError, PlacedPoint};
pub use zone::ExclusionZone;
