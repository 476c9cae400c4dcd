/// Frustum — six clipping planes for visibility culling.
///
/// Each plane's normal points inward (toward the visible volume), so a point
/// is inside the frustum when it is on the front side of all six planes.
/// Planes are normalized at extraction, which lets every test use the raw
/// plane value as a euclidean distance.
///
/// The `*_light` variants only test the four side planes (left, right,
/// bottom, top). They are meant for spot light and shadow culling where the
/// depth range is handled separately.

use glam::{Mat4, Vec3, Vec4};
use crate::bounds_warn;
use crate::geometry::EPSILON;
use super::aabbox::AABBox;
use super::clip::ClipResult;
use super::cone::Cone;
use super::obbox::OBBox;
use super::plane::Plane;
use super::sphere::Sphere;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

const SOURCE: &str = "galaxy3d::bounds::Frustum";

/// Number of planes tested by the `*_light` variants
const SIDE_PLANE_COUNT: usize = 4;

/// Six frustum planes for culling.
///
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    planes: [Plane; 6],
}

impl Frustum {
    /// Build a frustum from six inward planes (normalized here).
    pub fn from_planes(planes: [Plane; 6]) -> Self {
        Self { planes: planes.map(|plane| plane.normalized()) }
    }

    /// Extract frustum planes from a combined view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let to_plane = |v: Vec4| Plane::new(v.truncate(), v.w).normalized();

        Self {
            planes: [
                to_plane(row3 + row0), // Left
                to_plane(row3 - row0), // Right
                to_plane(row3 + row1), // Bottom
                to_plane(row3 - row1), // Top
                to_plane(row3 + row2), // Near
                to_plane(row3 - row2), // Far
            ],
        }
    }

    /// Extract frustum planes from separate projection and view matrices.
    pub fn from_projection_view(projection: &Mat4, view: &Mat4) -> Self {
        Self::from_view_projection(&(*projection * *view))
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Plane `index` (see the `PLANE_*` constants).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`.
    pub fn plane(&self, index: usize) -> &Plane {
        assert!(index < 6, "Frustum plane index {} out of range", index);
        &self.planes[index]
    }

    // ===== POINT =====

    pub fn include_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.dot_coord(point) >= 0.0)
    }

    /// Classify a point; points within `EPSILON` of a plane report `Intersect`.
    pub fn clip_point(&self, point: Vec3) -> ClipResult {
        Self::clip_with(&self.planes, |plane| {
            let distance = plane.dot_coord(point);
            if distance > EPSILON {
                ClipResult::Inside
            } else if distance < -EPSILON {
                ClipResult::Outside
            } else {
                ClipResult::Intersect
            }
        })
    }

    // ===== SPHERE =====

    pub fn clip_sphere(&self, sphere: &Sphere) -> ClipResult {
        Self::clip_with(&self.planes, |plane| plane.clip_sphere(sphere))
    }

    pub fn clip_sphere_light(&self, sphere: &Sphere) -> ClipResult {
        Self::clip_with(self.side_planes(), |plane| plane.clip_sphere(sphere))
    }

    // ===== AXIS-ALIGNED BOX =====

    /// Classify an axis-aligned box (3-way test).
    ///
    /// Tests both the positive vertex (p-vertex) and negative vertex (n-vertex)
    /// against each plane:
    /// - If the p-vertex is outside any plane → `Outside` (early out)
    /// - If the n-vertex is outside any plane → at least `Intersect`
    /// - If all n-vertices are inside all planes → `Inside`
    pub fn clip_aabbox(&self, aabbox: &AABBox) -> ClipResult {
        Self::clip_with(&self.planes, |plane| Self::clip_aabbox_plane(plane, aabbox))
    }

    pub fn clip_aabbox_light(&self, aabbox: &AABBox) -> ClipResult {
        Self::clip_with(self.side_planes(), |plane| Self::clip_aabbox_plane(plane, aabbox))
    }

    fn clip_aabbox_plane(plane: &Plane, aabbox: &AABBox) -> ClipResult {
        let normal = plane.normal;
        let min = aabbox.min();
        let max = aabbox.max();

        // Positive vertex: corner most in the direction of the normal
        let p_vertex = Vec3::new(
            if normal.x >= 0.0 { max.x } else { min.x },
            if normal.y >= 0.0 { max.y } else { min.y },
            if normal.z >= 0.0 { max.z } else { min.z },
        );
        if plane.dot_coord(p_vertex) < 0.0 {
            return ClipResult::Outside;
        }

        // Negative vertex: corner least in the direction of the normal
        let n_vertex = Vec3::new(
            if normal.x >= 0.0 { min.x } else { max.x },
            if normal.y >= 0.0 { min.y } else { max.y },
            if normal.z >= 0.0 { min.z } else { max.z },
        );
        if plane.dot_coord(n_vertex) < 0.0 {
            ClipResult::Intersect
        } else {
            ClipResult::Inside
        }
    }

    // ===== ORIENTED BOX =====

    pub fn clip_obbox(&self, obbox: &OBBox) -> ClipResult {
        Self::clip_with(&self.planes, |plane| plane.clip_obbox(obbox))
    }

    pub fn clip_obbox_light(&self, obbox: &OBBox) -> ClipResult {
        Self::clip_with(self.side_planes(), |plane| plane.clip_obbox(obbox))
    }

    // ===== CONE =====

    /// Classify a cone plane by plane with `Plane::clip_cone`.
    ///
    /// An invalid cone is rejected once here, before any plane is tested.
    pub fn clip_cone(&self, cone: &Cone) -> ClipResult {
        Self::clip_cone_with(&self.planes, cone)
    }

    pub fn clip_cone_light(&self, cone: &Cone) -> ClipResult {
        Self::clip_cone_with(self.side_planes(), cone)
    }

    fn clip_cone_with(planes: &[Plane], cone: &Cone) -> ClipResult {
        if !cone.is_valid() {
            bounds_warn!(SOURCE, "clip_cone on an invalid cone, reporting Outside");
            return ClipResult::Outside;
        }
        Self::clip_with(planes, |plane| plane.clip_cone(cone))
    }

    // ===== HELPERS =====

    fn side_planes(&self) -> &[Plane] {
        &self.planes[..SIDE_PLANE_COUNT]
    }

    /// Merge per-plane results, stopping at the first `Outside`.
    fn clip_with<F>(planes: &[Plane], mut clip_plane: F) -> ClipResult
    where
        F: FnMut(&Plane) -> ClipResult,
    {
        let mut result = ClipResult::Inside;
        for plane in planes {
            result = result.merge(clip_plane(plane));
            if result == ClipResult::Outside {
                break;
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
