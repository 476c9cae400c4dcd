/// Axis-aligned bounding boxes.
///
/// `AABBox` is stored as center + half-size (min = center − half, max =
/// center + half). Box/box and box/point tests are slab comparisons; sphere
/// tests project the sphere center onto the box; cone tests work in the
/// cone's cross-section coordinates.
///
/// `build_intersection` and `build_union` combine per axis and do not check
/// that the boxes overlap: call `intersect_aabbox` first when it matters.

use std::f32::consts::PI;
use glam::{Mat4, Vec2, Vec3};
use crate::bounds_warn;
use crate::geometry::{intersect_segment_aabb, EPSILON};
use super::clip::ClipResult;
use super::plane::Plane;
use super::sphere::Sphere;
use super::cone::{Cone, ConeTrig, FULL_BALL_CUTOFF};

const SOURCE: &str = "galaxy3d::bounds::AABBox";

/// Number of corners of a box
pub const CORNER_COUNT: usize = 8;

/// Number of face planes of a box
pub const FACE_COUNT: usize = 6;

// ===== AABBOX =====

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AABBox {
    pub center: Vec3,
    /// All components >= 0
    pub half_size: Vec3,
}

impl AABBox {
    /// Create a box from its center and half-size (made non-negative).
    pub fn new(center: Vec3, half_size: Vec3) -> Self {
        Self { center, half_size: half_size.abs() }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    /// Tightest box around a point set, `None` when the set is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self::from_min_max(min, max))
    }

    pub fn from_sphere(sphere: &Sphere) -> Self {
        Self::new(sphere.center, Vec3::splat(sphere.radius))
    }

    /// Tightest box around a cone.
    ///
    /// Each axis takes the cone's extremal surface points along ±axis (apex,
    /// or the axis rotated toward the world axis within the cutoff). When the
    /// cone direction is aligned with a world axis, that axis is simply the
    /// apex-to-top range.
    pub fn from_cone(cone: &Cone) -> Self {
        let direction = cone.direction();
        let origin = cone.origin();
        let top = cone.top();
        let mut min = Vec3::ZERO;
        let mut max = Vec3::ZERO;

        for axis in 0..3 {
            let aligned = 1.0 - direction[axis].abs() <= EPSILON;
            if aligned && (!cone.is_spherical() || cone.cos_cutoff() >= 0.0) {
                min[axis] = origin[axis].min(top[axis]);
                max[axis] = origin[axis].max(top[axis]);
            } else {
                let unit = Vec3::AXES[axis];
                min[axis] = -cone.support(-unit);
                max[axis] = cone.support(unit);
            }
        }

        Self::from_min_max(min, max)
    }

    // ===== ACCESSORS =====

    pub fn min(&self) -> Vec3 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_size
    }

    pub fn size(&self) -> Vec3 {
        self.half_size * 2.0
    }

    /// Radius of the largest sphere centered in the box.
    pub fn inner_radius(&self) -> f32 {
        self.half_size.min_element()
    }

    /// Radius of the sphere through the corners.
    pub fn outer_radius(&self) -> f32 {
        self.half_size.length()
    }

    /// Corner `index` (bit0 = X, bit1 = Y, bit2 = Z; 0 = min, 1 = max).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 8`.
    pub fn corner(&self, index: usize) -> Vec3 {
        assert!(index < CORNER_COUNT, "AABBox corner index {} out of range", index);
        let sign = Vec3::new(
            if index & 1 == 0 { -1.0 } else { 1.0 },
            if index & 2 == 0 { -1.0 } else { 1.0 },
            if index & 4 == 0 { -1.0 } else { 1.0 },
        );
        self.center + self.half_size * sign
    }

    pub fn corners(&self) -> [Vec3; CORNER_COUNT] {
        std::array::from_fn(|index| self.corner(index))
    }

    /// Face plane `index` with an inward normal: -X, +X, -Y, +Y, -Z, +Z faces.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`.
    pub fn face_plane(&self, index: usize) -> Plane {
        assert!(index < FACE_COUNT, "AABBox face index {} out of range", index);
        let axis = index / 2;
        let unit = Vec3::AXES[axis];
        if index % 2 == 0 {
            Plane::new(unit, -self.min()[axis])
        } else {
            Plane::new(-unit, self.max()[axis])
        }
    }

    /// The six face planes, normals pointing into the box.
    pub fn planes(&self) -> [Plane; FACE_COUNT] {
        std::array::from_fn(|index| self.face_plane(index))
    }

    /// Projection on the XY plane.
    pub fn to_xy(&self) -> AABBox2 {
        AABBox2::new(self.center.truncate(), self.half_size.truncate())
    }

    // ===== POINT / BOX =====

    pub fn include_point(&self, point: Vec3) -> bool {
        (point - self.center).abs().cmple(self.half_size).all()
    }

    /// `true` if `other` lies entirely inside `self`.
    pub fn include_aabbox(&self, other: &AABBox) -> bool {
        self.min().cmple(other.min()).all() && self.max().cmpge(other.max()).all()
    }

    /// `true` if the boxes overlap or touch.
    pub fn intersect_aabbox(&self, other: &AABBox) -> bool {
        (self.center - other.center).abs().cmple(self.half_size + other.half_size).all()
    }

    pub fn clip_aabbox(&self, other: &AABBox) -> ClipResult {
        if self.include_aabbox(other) {
            ClipResult::Inside
        } else if self.intersect_aabbox(other) {
            ClipResult::Intersect
        } else {
            ClipResult::Outside
        }
    }

    // ===== SPHERE =====

    /// `true` if the sphere lies entirely inside the box.
    pub fn include_sphere(&self, sphere: &Sphere) -> bool {
        let reach = (sphere.center - self.center).abs() + Vec3::splat(sphere.radius);
        reach.cmple(self.half_size).all()
    }

    /// `true` if the sphere touches the box.
    ///
    /// The sphere center is projected on the box (per-face clamp); the sphere
    /// reaches the box when that nearest point is within its radius.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> bool {
        let nearest = sphere.center.clamp(self.min(), self.max());
        nearest.distance_squared(sphere.center) <= sphere.radius * sphere.radius
    }

    pub fn clip_sphere(&self, sphere: &Sphere) -> ClipResult {
        if self.include_sphere(sphere) {
            ClipResult::Inside
        } else if self.intersect_sphere(sphere) {
            ClipResult::Intersect
        } else {
            ClipResult::Outside
        }
    }

    // ===== TRIANGLE / SEGMENT / PLANE =====

    /// Separating-axis test between the box and triangle `abc`.
    ///
    /// Tests the three box normals, the triangle normal and the nine
    /// edge × axis cross products. Degenerate triangles reduce to the segment
    /// they span (zero axes never separate).
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> bool {
        let v0 = a - self.center;
        let v1 = b - self.center;
        let v2 = c - self.center;
        let edges = [v1 - v0, v2 - v1, v0 - v2];

        let separated = |axis: Vec3| {
            let (p0, p1, p2) = (v0.dot(axis), v1.dot(axis), v2.dot(axis));
            let radius = self.half_size.dot(axis.abs());
            p0.min(p1).min(p2) > radius || p0.max(p1).max(p2) < -radius
        };

        for edge in edges {
            for unit in Vec3::AXES {
                if separated(unit.cross(edge)) {
                    return false;
                }
            }
        }
        if Vec3::AXES.into_iter().any(&separated) {
            return false;
        }
        !separated(edges[0].cross(edges[1]))
    }

    /// `true` if the segment `[a, b]` touches the box.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> bool {
        intersect_segment_aabb(a, b, self.min(), self.max()).is_some()
    }

    /// Part of the segment `[a, b]` inside the box, clipped against the six
    /// face planes.
    pub fn clip_segment(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        self.planes()
            .iter()
            .try_fold((a, b), |(a, b), plane| plane.clip_segment_front(a, b))
    }

    /// Where the box lies relative to the plane's front half-space.
    pub fn clip_plane(&self, plane: &Plane) -> ClipResult {
        plane.clip_aabbox(self)
    }

    // ===== CONE =====

    /// Where the box lies relative to the cone.
    ///
    /// 1. outer sphere: reject when disjoint, intersect when the box holds it
    /// 2. box inside the inner sphere: inside
    /// 3. corners classified in cone-local coordinates
    /// 4. mixed corners: intersect
    /// 5. no corner inside: outline segments, then a separating axis search
    pub fn clip_cone(&self, cone: &Cone) -> ClipResult {
        if !cone.is_valid() {
            bounds_warn!(SOURCE, "clip_cone on an invalid cone, reporting Outside");
            return ClipResult::Outside;
        }

        let outer = cone.outer_sphere();
        if !self.intersect_sphere(&outer) {
            return ClipResult::Outside;
        }
        if self.include_sphere(&outer) {
            return ClipResult::Intersect;
        }
        if cone.inner_sphere().include_aabbox(self) {
            return ClipResult::Inside;
        }

        let inside = self
            .corners()
            .iter()
            .filter(|corner| {
                let (axial, radial) = cone.local(**corner);
                cone.profile_contains(axial, radial)
            })
            .count();

        match inside {
            CORNER_COUNT => {
                if cone.is_spherical() && cone.cos_cutoff() < 0.0 {
                    self.clip_excluded_back_cone(cone)
                } else {
                    ClipResult::Inside
                }
            }
            0 => self.clip_cone_outline(cone),
            _ => ClipResult::Intersect,
        }
    }

    /// All corners inside an obtuse spherical cone: the box is inside unless it
    /// reaches into the cone carved out behind the apex.
    fn clip_excluded_back_cone(&self, cone: &Cone) -> ClipResult {
        if cone.cutoff() >= FULL_BALL_CUTOFF {
            return ClipResult::Inside;
        }
        // Flat cone of the same depth covers the excluded region inside the ball
        let back = Cone::new(
            cone.origin(),
            -cone.direction(),
            cone.depth(),
            PI - cone.cutoff(),
            false,
        );
        match self.clip_cone(&back) {
            ClipResult::Outside => ClipResult::Inside,
            _ => ClipResult::Intersect,
        }
    }

    /// No corner inside the cone: the cone may still cross the box.
    ///
    /// Apex, axis and the four outline segments along ±H/±V are tested
    /// against the box (plus the base radii of flat cones). Failing that, the
    /// box is outside only if a separating axis is found among the box
    /// normals, the cone axis, and the lateral (and cap) normals facing each
    /// corner. Undecided cases report `Intersect`.
    fn clip_cone_outline(&self, cone: &Cone) -> ClipResult {
        let min = self.min();
        let max = self.max();
        let origin = cone.origin();
        let direction = cone.direction();
        let ConeTrig { cos, sin, .. } = cone.trig();

        if self.include_point(origin) || self.intersect_segment(origin, cone.top()) {
            return ClipResult::Intersect;
        }

        // Long enough to cross the whole box from the apex
        let reach = (self.center - origin).length() + self.outer_radius();
        let lateral_len = if cone.is_spherical() {
            cone.depth()
        } else if cos <= EPSILON {
            reach
        } else {
            (cone.depth() / cos).min(reach)
        };
        let base_len = cone.base_radius().min(reach);

        let (h, v) = cone.basis();
        for side in [h, -h, v, -v] {
            let rim = origin + (direction * cos + side * sin) * lateral_len;
            if intersect_segment_aabb(origin, rim, min, max).is_some() {
                return ClipResult::Intersect;
            }
            if !cone.is_spherical() {
                let base = cone.base();
                if intersect_segment_aabb(base, base + side * base_len, min, max).is_some() {
                    return ClipResult::Intersect;
                }
            }
        }

        let mut axes = vec![Vec3::X, Vec3::Y, Vec3::Z, direction];
        for point in self.corners().into_iter().chain(std::iter::once(self.center)) {
            let offset = point - origin;
            let radial = offset - direction * offset.dot(direction);
            if radial.length_squared() > EPSILON * EPSILON {
                // Outward normal of the lateral surface in this half-plane
                axes.push(radial.normalize() * cos - direction * sin);
            }
            if cone.is_spherical() {
                axes.push(offset.normalize_or_zero());
            }
        }

        if axes.iter().any(|axis| self.separated_from_cone(cone, *axis)) {
            ClipResult::Outside
        } else {
            ClipResult::Intersect
        }
    }

    /// Whether `axis` separates the box from the cone's convex hull.
    fn separated_from_cone(&self, cone: &Cone, axis: Vec3) -> bool {
        if axis.length_squared() <= EPSILON * EPSILON {
            return false;
        }
        let center = self.center.dot(axis);
        let radius = self.half_size.dot(axis.abs());
        let cone_max = cone.support(axis);
        let cone_min = -cone.support(-axis);
        center - radius > cone_max || center + radius < cone_min
    }

    // ===== CONSTRUCTION =====

    /// Per-axis overlap of both boxes. Does not check that they intersect.
    pub fn build_intersection(&self, other: &AABBox) -> AABBox {
        AABBox::from_min_max(self.min().max(other.min()), self.max().min(other.max()))
    }

    /// Smallest box holding both boxes.
    pub fn build_union(&self, other: &AABBox) -> AABBox {
        AABBox::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Grow the box to hold `point`.
    pub fn extend_point(&mut self, point: Vec3) {
        *self = AABBox::from_min_max(self.min().min(point), self.max().max(point));
    }

    /// Transform this box by a matrix, returning the box around the result.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABBox {
        let translation = matrix.col(3).truncate();
        let (min, max) = (self.min(), self.max());
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * min[i];
            let b = axis * max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABBox::from_min_max(new_min, new_max)
    }
}

// ===== AABBOX2 =====

/// 2D axis-aligned box (screen rectangles, XY footprints).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AABBox2 {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl AABBox2 {
    pub fn new(center: Vec2, half_size: Vec2) -> Self {
        Self { center, half_size: half_size.abs() }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_size
    }

    pub fn include_point(&self, point: Vec2) -> bool {
        (point - self.center).abs().cmple(self.half_size).all()
    }

    pub fn include(&self, other: &AABBox2) -> bool {
        self.min().cmple(other.min()).all() && self.max().cmpge(other.max()).all()
    }

    pub fn intersect(&self, other: &AABBox2) -> bool {
        (self.center - other.center).abs().cmple(self.half_size + other.half_size).all()
    }

    pub fn clip(&self, other: &AABBox2) -> ClipResult {
        if self.include(other) {
            ClipResult::Inside
        } else if self.intersect(other) {
            ClipResult::Intersect
        } else {
            ClipResult::Outside
        }
    }
}

#[cfg(test)]
#[path = "aabbox_tests.rs"]
mod tests;
