/// Plane — infinite half-space `dot(normal, p) + d`.
///
/// The front side is where the value is positive. The normal does not have to
/// be unit length: sign tests work on the raw value, and only `distance()`
/// pays for a normalization. Callers that need many distances should call
/// `normalize()` once and then use `dot_coord()`.

use glam::{Mat3, Mat4, Vec3};
use crate::bounds_warn;
use crate::geometry::{intersect_line_plane, EPSILON};
use super::clip::{ClipResult, PlaneSide};
use super::sphere::Sphere;
use super::aabbox::AABBox;
use super::obbox::OBBox;
use super::cone::Cone;

const SOURCE: &str = "galaxy3d::bounds::Plane";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal (front side direction)
    pub normal: Vec3,
    /// Offset: `dot(normal, p) + d == 0` on the plane
    pub d: f32,
}

impl Plane {
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane through `point` facing `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self { normal, d: -normal.dot(point) }
    }

    /// Plane through three points, front side given by the counter-clockwise
    /// winding `a → b → c`. The normal is normalized.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self::from_point_normal(a, normal)
    }

    /// Same plane with the front and back sides swapped.
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, d: -self.d }
    }

    /// Scale the plane so that its normal is unit length.
    ///
    /// A zero normal is left untouched.
    pub fn normalize(&mut self) {
        let len = self.normal.length();
        if len > 0.0 {
            self.normal /= len;
            self.d /= len;
        }
    }

    pub fn normalized(&self) -> Self {
        let mut plane = *self;
        plane.normalize();
        plane
    }

    pub fn is_normalized(&self) -> bool {
        (self.normal.length_squared() - 1.0).abs() <= EPSILON * 10.0
    }

    /// Raw plane equation value (signed distance scaled by `|normal|`).
    #[inline]
    pub fn dot_coord(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Signed euclidean distance from `point`. Normalizes on every call.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normalized().dot_coord(point)
    }

    /// Classify a point with an `EPSILON` band around the plane.
    pub fn classify(&self, point: Vec3) -> PlaneSide {
        let distance = self.distance(point);
        if distance > EPSILON {
            PlaneSide::Front
        } else if distance < -EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::On
        }
    }

    /// Point where the segment `[a, b]` crosses the plane, if it does.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> Option<Vec3> {
        let da = self.dot_coord(a);
        let db = self.dot_coord(b);
        if (da > 0.0 && db > 0.0) || (da < 0.0 && db < 0.0) {
            return None;
        }
        let t = intersect_line_plane(a, b - a, self)?;
        Some(a + (b - a) * t.clamp(0.0, 1.0))
    }

    // ===== SEGMENT / POLYGON CLIPPING =====

    /// Keep the part of `[a, b]` on the front side (points on the plane are kept).
    pub fn clip_segment_front(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        let a_front = self.classify(a) != PlaneSide::Back;
        let b_front = self.classify(b) != PlaneSide::Back;

        match (a_front, b_front) {
            (true, true) => Some((a, b)),
            (false, false) => None,
            _ => {
                let t = intersect_line_plane(a, b - a, self)?.clamp(0.0, 1.0);
                let hit = a + (b - a) * t;
                if a_front {
                    Some((a, hit))
                } else {
                    Some((hit, b))
                }
            }
        }
    }

    /// Keep the part of `[a, b]` on the back side (points on the plane are kept).
    pub fn clip_segment_back(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        self.flipped().clip_segment_front(a, b)
    }

    /// Sutherland–Hodgman clip of a convex polygon, keeping the front side.
    ///
    /// Returns an empty vector when nothing is left.
    pub fn clip_polygon_front(&self, polygon: &[Vec3]) -> Vec<Vec3> {
        let mut output = Vec::with_capacity(polygon.len() + 1);
        let Some(&last) = polygon.last() else {
            return output;
        };

        let mut previous = last;
        let mut previous_front = self.classify(previous) != PlaneSide::Back;

        for &current in polygon {
            let current_front = self.classify(current) != PlaneSide::Back;

            if current_front != previous_front {
                if let Some(t) = intersect_line_plane(previous, current - previous, self) {
                    output.push(previous + (current - previous) * t.clamp(0.0, 1.0));
                }
            }
            if current_front {
                output.push(current);
            }

            previous = current;
            previous_front = current_front;
        }

        output
    }

    /// Sutherland–Hodgman clip of a convex polygon, keeping the back side.
    pub fn clip_polygon_back(&self, polygon: &[Vec3]) -> Vec<Vec3> {
        self.flipped().clip_polygon_front(polygon)
    }

    // ===== VOLUME CLASSIFICATION =====

    /// Where a sphere lies relative to the front half-space.
    pub fn clip_sphere(&self, sphere: &Sphere) -> ClipResult {
        let distance = self.distance(sphere.center);
        if distance >= sphere.radius {
            ClipResult::Inside
        } else if distance < -sphere.radius {
            ClipResult::Outside
        } else {
            ClipResult::Intersect
        }
    }

    /// Where an axis-aligned box lies relative to the front half-space.
    pub fn clip_aabbox(&self, aabbox: &AABBox) -> ClipResult {
        let radius = self.normal.abs().dot(aabbox.half_size);
        self.clip_projected(aabbox.center, radius)
    }

    /// Where an oriented box lies relative to the front half-space.
    ///
    /// Exact: the box projects onto the normal as `Σ |n·axisᵢ| · halfᵢ`.
    pub fn clip_obbox(&self, obbox: &OBBox) -> ClipResult {
        let radius = self.normal.dot(obbox.axes.x_axis).abs() * obbox.half_size.x
            + self.normal.dot(obbox.axes.y_axis).abs() * obbox.half_size.y
            + self.normal.dot(obbox.axes.z_axis).abs() * obbox.half_size.z;
        self.clip_projected(obbox.center, radius)
    }

    /// Classify a symmetric volume given its center and its extent along the
    /// (unnormalized) normal.
    fn clip_projected(&self, center: Vec3, radius: f32) -> ClipResult {
        let value = self.dot_coord(center);
        if value - radius >= 0.0 {
            ClipResult::Inside
        } else if value + radius < 0.0 {
            ClipResult::Outside
        } else {
            ClipResult::Intersect
        }
    }

    /// Where a cone lies relative to the front half-space.
    ///
    /// The cone's outer sphere settles most cases; a plane cutting its inner
    /// sphere necessarily cuts the cone. Otherwise the cone points nearest to
    /// and farthest from the plane (axis rotated toward the normal, limited by
    /// the cutoff, see `Cone::support`) decide.
    pub fn clip_cone(&self, cone: &Cone) -> ClipResult {
        if !cone.is_valid() {
            bounds_warn!(SOURCE, "clip_cone on an invalid cone, reporting Outside");
            return ClipResult::Outside;
        }

        match self.clip_sphere(&cone.outer_sphere()) {
            ClipResult::Intersect => {}
            settled => return settled,
        }
        if self.clip_sphere(&cone.inner_sphere()) == ClipResult::Intersect {
            return ClipResult::Intersect;
        }

        let plane = self.normalized();
        let farthest = cone.support(plane.normal) + plane.d;
        let nearest = plane.d - cone.support(-plane.normal);

        // Origin and top point belong to the cone: they tighten the range
        // against rounding in the support evaluation
        let origin = plane.dot_coord(cone.origin());
        let top = plane.dot_coord(cone.top());
        let nearest = nearest.min(origin).min(top);
        let farthest = farthest.max(origin).max(top);

        if nearest >= 0.0 {
            ClipResult::Inside
        } else if farthest < 0.0 {
            ClipResult::Outside
        } else {
            ClipResult::Intersect
        }
    }

    // ===== TRANSFORM =====

    /// Plane under an affine transform.
    ///
    /// The normal goes through the inverse-transpose of the linear part; a
    /// singular transform leaves the normal direction unchanged.
    pub fn transformed(&self, matrix: &Mat4) -> Plane {
        let len_sq = self.normal.length_squared();
        if len_sq == 0.0 {
            return *self;
        }
        let point = self.normal * (-self.d / len_sq);
        let linear = Mat3::from_mat4(*matrix);

        let normal = if linear.determinant().abs() > f32::EPSILON {
            linear.inverse().transpose() * self.normal
        } else {
            self.normal
        };

        Plane::from_point_normal(matrix.transform_point3(point), normal)
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
