//! Generator module — bounding volume fitting from point clouds.
//!
//! Loaders run it once per mesh; the resulting volumes are plain values
//! owned by the caller.

mod bounding_volume_generator;

pub use bounding_volume_generator::{BoundingVolumeGenerator, BoundingVolumes};
