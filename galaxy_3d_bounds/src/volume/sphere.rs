/// Sphere — bounding sphere volume.
///
/// Inclusion and intersection compare squared center distances against the
/// squared radius sum/difference, so the hot path never takes a square root.

use glam::{Mat4, Vec3};
use super::clip::ClipResult;
use super::plane::Plane;
use super::aabbox::AABBox;
use super::cone::Cone;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    pub center: Vec3,
    /// Never negative
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere. A negative radius is clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius: radius.max(0.0) }
    }

    /// Smallest sphere enclosing an axis-aligned box.
    pub fn from_aabbox(aabbox: &AABBox) -> Self {
        Self::new(aabbox.center, aabbox.half_size.length())
    }

    // ===== POINT / SPHERE =====

    pub fn include_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// `true` if `other` lies entirely inside `self`.
    pub fn include_sphere(&self, other: &Sphere) -> bool {
        let slack = self.radius - other.radius;
        slack >= 0.0 && self.center.distance_squared(other.center) <= slack * slack
    }

    pub fn intersect_sphere(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    pub fn clip_sphere(&self, other: &Sphere) -> ClipResult {
        if self.include_sphere(other) {
            ClipResult::Inside
        } else if self.intersect_sphere(other) {
            ClipResult::Intersect
        } else {
            ClipResult::Outside
        }
    }

    // ===== AXIS-ALIGNED BOX =====

    /// `true` if every corner of `aabbox` lies inside the sphere.
    pub fn include_aabbox(&self, aabbox: &AABBox) -> bool {
        // Farthest corner, one axis at a time
        let offset = (aabbox.center - self.center).abs() + aabbox.half_size;
        offset.length_squared() <= self.radius * self.radius
    }

    pub fn intersect_aabbox(&self, aabbox: &AABBox) -> bool {
        aabbox.intersect_sphere(self)
    }

    pub fn clip_aabbox(&self, aabbox: &AABBox) -> ClipResult {
        if self.include_aabbox(aabbox) {
            ClipResult::Inside
        } else if self.intersect_aabbox(aabbox) {
            ClipResult::Intersect
        } else {
            ClipResult::Outside
        }
    }

    // ===== PLANE / CONE =====

    /// Where the sphere lies relative to the plane's front half-space.
    pub fn clip_plane(&self, plane: &Plane) -> ClipResult {
        plane.clip_sphere(self)
    }

    /// Where the sphere lies relative to the cone.
    ///
    /// The center is projected into the cone's cross-section (axial depth and
    /// distance to the axis) and measured against the outline features: apex,
    /// lateral edge, base (flat segment or spherical arc) and, for obtuse
    /// spherical cones, the edge bounding the excluded back cone.
    pub fn clip_cone(&self, cone: &Cone) -> ClipResult {
        cone.clip_sphere(self)
    }

    // ===== CONSTRUCTION =====

    /// Smallest sphere enclosing `self` and `other`.
    pub fn build_union(&self, other: &Sphere) -> Sphere {
        if self.include_sphere(other) {
            return *self;
        }
        if other.include_sphere(self) {
            return *other;
        }

        let offset = other.center - self.center;
        let distance = offset.length();
        let radius = (distance + self.radius + other.radius) * 0.5;
        let center = self.center + offset * ((radius - self.radius) / distance);
        Sphere::new(center, radius)
    }

    /// Sphere under an affine transform.
    ///
    /// The radius is scaled by the largest axis scale factor, which over-
    /// approximates non-uniform scales.
    pub fn transformed(&self, matrix: &Mat4) -> Sphere {
        let scale = matrix
            .x_axis
            .truncate()
            .length()
            .max(matrix.y_axis.truncate().length())
            .max(matrix.z_axis.truncate().length());

        Sphere::new(matrix.transform_point3(self.center), self.radius * scale)
    }
}

#[cfg(test)]
#[path = "sphere_tests.rs"]
mod tests;
