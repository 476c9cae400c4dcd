/*!
# Galaxy 3D Bounds

Bounding volumes and analytic clipping tests for the Galaxy 3D engine.

This crate answers visibility and containment questions without tessellation:
"is this volume fully, partially or not inside that one?" and "does this
segment cross that surface?". The renderer's visibility pass calls into it once
per drawable per frame; loaders use the generator to fit volumes to meshes.

## Architecture

- **Plane**: half-space classification and segment/polygon clipping
- **Sphere**: bounding sphere tests, union and transform
- **AABBox / AABBoxExt**: axis-aligned boxes, the extended variant caches radii
- **OBBox / OBBoxExt**: oriented boxes fitted by the generator
- **Cone**: spherical-cap or flat-base cone (spot and point light volumes)
- **Frustum**: six planes extracted from a projection × view matrix
- **BoundingVolumeGenerator**: four-pass streaming fit from a point cloud

All volumes are plain values built on `glam` types.
*/

// Internal modules
mod error;
pub mod log;
pub mod geometry;
pub mod volume;
pub mod generator;
pub mod wire;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and logger hub, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, log, log_detailed,
        };
    }

    // Bounding volume sub-module
    pub mod bounds {
        pub use crate::volume::*;
        pub use crate::generator::{BoundingVolumeGenerator, BoundingVolumes};
        pub use crate::wire::WireFormat;
    }

    // Geometry helpers sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }
}

// Re-export math library at crate root
pub use glam;
