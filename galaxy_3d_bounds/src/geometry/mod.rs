//! Geometry helpers shared by every bounding volume.
//!
//! Free functions only: line/plane, line/quad and line/sphere intersection,
//! nearest points on segments and quads, and the slab test used by the box
//! and cone classifiers. Tolerances live here as compile-time constants.

mod intersection;

pub use intersection::{
    Quad, LineSphereHit,
    intersect_line_plane, intersect_line_quad, intersect_line_sphere,
    intersect_segment_aabb,
    nearest_point_on_segment, nearest_point_on_quad,
};

/// Thickness of the "on plane" band and the tangency threshold for
/// line/sphere discriminants.
pub const EPSILON: f32 = 1.0e-5;

/// Below this `|dot(normal, dir)|` a line is treated as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1.0e-6;

/// Accepted deviation of `|v|²` from 1 for vectors that must be unit length.
pub const UNIT_LENGTH_TOLERANCE: f32 = 1.0e-3;

/// Above this `|dot(dir, Y)|` the cone basis is built from X instead of Y.
pub const BASIS_Y_THRESHOLD: f32 = 0.99;
