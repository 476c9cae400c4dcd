/// Cone — spherical-cap or flat-base cone volume.
///
/// Used for spot lights (flat base, a pyramid-like volume closed by a disk)
/// and for point-light falloff volumes (spherical cap, the set of points
/// within `depth` of the origin and within `cutoff` of the direction).
///
/// The cone stores five inputs and derives several groups of values from
/// them: cutoff trigonometry, a basis of the base plane, the top and base
/// points, and the inscribed/circumscribed spheres. Each group lives in its
/// own `OnceLock`, filled on first read. Setters take `&mut self` and empty
/// exactly the groups that depend on the changed input (selected through a
/// `ConeGroups` mask). Concurrent first reads on a shared cone synchronize
/// inside the cells.
///
/// Invalid cones (cutoff out of range, non-unit direction, negative depth)
/// answer every query with the conservative `Outside`/`false` and log a
/// warning.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::OnceLock;
use bitflags::bitflags;
use glam::Vec3;
use crate::bounds_warn;
use crate::geometry::{BASIS_Y_THRESHOLD, EPSILON, UNIT_LENGTH_TOLERANCE};
use super::clip::ClipResult;
use super::sphere::Sphere;
use super::aabbox::AABBox;

const SOURCE: &str = "galaxy3d::bounds::Cone";

/// Below this cosine the flat base is treated as unbounded (cutoff = π/2).
const FLAT_COS_EPSILON: f32 = 1.0e-6;

/// Above this cutoff a spherical cone is a full ball.
pub(crate) const FULL_BALL_CUTOFF: f32 = PI - 1.0e-4;

bitflags! {
    /// Groups of derived cone values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConeGroups: u8 {
        /// cos / sin / tan of the cutoff
        const TRIGONOMETRY = 1 << 0;
        /// Base plane basis vectors H and V
        const BASIS = 1 << 1;
        /// Top point
        const TOP = 1 << 2;
        /// Base point
        const BASE = 1 << 3;
        /// Inner and outer spheres
        const SPHERES = 1 << 4;
        /// Validity flag
        const VALIDITY = 1 << 5;
    }
}

impl ConeGroups {
    const ON_ORIGIN: ConeGroups = ConeGroups::TOP
        .union(ConeGroups::BASE)
        .union(ConeGroups::SPHERES);
    const ON_DIRECTION: ConeGroups = ConeGroups::BASIS
        .union(ConeGroups::TOP)
        .union(ConeGroups::BASE)
        .union(ConeGroups::SPHERES)
        .union(ConeGroups::VALIDITY);
    const ON_DEPTH: ConeGroups = ConeGroups::TOP
        .union(ConeGroups::BASE)
        .union(ConeGroups::SPHERES)
        .union(ConeGroups::VALIDITY);
    const ON_CUTOFF: ConeGroups = ConeGroups::TRIGONOMETRY
        .union(ConeGroups::BASE)
        .union(ConeGroups::SPHERES)
        .union(ConeGroups::VALIDITY);
    const ON_SPHERICAL: ConeGroups = ConeGroups::BASE
        .union(ConeGroups::SPHERES)
        .union(ConeGroups::VALIDITY);
}

/// Cutoff trigonometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeTrig {
    pub cos: f32,
    pub sin: f32,
    /// `f32::INFINITY` when the cosine vanishes
    pub tan: f32,
}

#[derive(Debug, Clone, Default)]
struct ConeCache {
    trig: OnceLock<ConeTrig>,
    basis: OnceLock<(Vec3, Vec3)>,
    top: OnceLock<Vec3>,
    base: OnceLock<Vec3>,
    spheres: OnceLock<(Sphere, Sphere)>,
    valid: OnceLock<bool>,
}

#[derive(Debug, Clone)]
pub struct Cone {
    origin: Vec3,
    direction: Vec3,
    depth: f32,
    cutoff: f32,
    spherical: bool,
    cache: ConeCache,
}

impl PartialEq for Cone {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.direction == other.direction
            && self.depth == other.depth
            && self.cutoff == other.cutoff
            && self.spherical == other.spherical
    }
}

impl Default for Cone {
    /// Flat 45° cone of depth 1 looking down +Z.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, 1.0, std::f32::consts::FRAC_PI_4, false)
    }
}

impl Cone {
    /// Create a cone.
    ///
    /// * `origin` - apex
    /// * `direction` - unit axis direction
    /// * `depth` - axial length (flat) or radius (spherical)
    /// * `cutoff` - half-angle, [0, π/2] for flat, [0, π] for spherical
    /// * `spherical` - spherical cap instead of flat base
    pub fn new(origin: Vec3, direction: Vec3, depth: f32, cutoff: f32, spherical: bool) -> Self {
        Self {
            origin,
            direction,
            depth,
            cutoff,
            spherical,
            cache: ConeCache::default(),
        }
    }

    // ===== INPUTS =====

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn is_spherical(&self) -> bool {
        self.spherical
    }

    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
        self.invalidate(ConeGroups::ON_ORIGIN);
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
        self.invalidate(ConeGroups::ON_DIRECTION);
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
        self.invalidate(ConeGroups::ON_DEPTH);
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff = cutoff;
        self.invalidate(ConeGroups::ON_CUTOFF);
    }

    pub fn set_spherical(&mut self, spherical: bool) {
        self.spherical = spherical;
        self.invalidate(ConeGroups::ON_SPHERICAL);
    }

    // ===== CACHE =====

    fn invalidate(&mut self, groups: ConeGroups) {
        if groups.contains(ConeGroups::TRIGONOMETRY) {
            self.cache.trig.take();
        }
        if groups.contains(ConeGroups::BASIS) {
            self.cache.basis.take();
        }
        if groups.contains(ConeGroups::TOP) {
            self.cache.top.take();
        }
        if groups.contains(ConeGroups::BASE) {
            self.cache.base.take();
        }
        if groups.contains(ConeGroups::SPHERES) {
            self.cache.spheres.take();
        }
        if groups.contains(ConeGroups::VALIDITY) {
            self.cache.valid.take();
        }
    }

    /// Groups that will be recomputed on their next read.
    pub fn dirty(&self) -> ConeGroups {
        let mut dirty = ConeGroups::empty();
        dirty.set(ConeGroups::TRIGONOMETRY, self.cache.trig.get().is_none());
        dirty.set(ConeGroups::BASIS, self.cache.basis.get().is_none());
        dirty.set(ConeGroups::TOP, self.cache.top.get().is_none());
        dirty.set(ConeGroups::BASE, self.cache.base.get().is_none());
        dirty.set(ConeGroups::SPHERES, self.cache.spheres.get().is_none());
        dirty.set(ConeGroups::VALIDITY, self.cache.valid.get().is_none());
        dirty
    }

    /// Compute every derived group now.
    ///
    /// Useful before handing the cone to culling jobs so no job pays for the
    /// first read.
    pub fn prepare(&self) {
        self.trig();
        self.basis();
        self.top();
        self.base();
        self.spheres();
        self.is_valid();
    }

    // ===== DERIVED VALUES =====

    pub fn trig(&self) -> ConeTrig {
        *self.cache.trig.get_or_init(|| {
            let (sin, cos) = self.cutoff.sin_cos();
            let tan = if cos.abs() <= FLAT_COS_EPSILON { f32::INFINITY } else { sin / cos };
            ConeTrig { cos, sin, tan }
        })
    }

    pub fn cos_cutoff(&self) -> f32 {
        self.trig().cos
    }

    pub fn sin_cutoff(&self) -> f32 {
        self.trig().sin
    }

    pub fn tan_cutoff(&self) -> f32 {
        self.trig().tan
    }

    /// Two unit vectors `(H, V)` spanning the plane orthogonal to the direction.
    ///
    /// `H` is `direction × Y`, or `direction × X` when the direction is
    /// nearly parallel to Y; `V = H × direction`.
    pub fn basis(&self) -> (Vec3, Vec3) {
        *self.cache.basis.get_or_init(|| {
            let reference = if self.direction.dot(Vec3::Y).abs() > BASIS_Y_THRESHOLD {
                Vec3::X
            } else {
                Vec3::Y
            };
            let h = self.direction.cross(reference).normalize_or_zero();
            let v = h.cross(self.direction).normalize_or_zero();
            (h, v)
        })
    }

    /// Farthest point along the axis: `origin + direction * depth`.
    pub fn top(&self) -> Vec3 {
        *self.cache.top.get_or_init(|| self.origin + self.direction * self.depth)
    }

    /// Center of the rim circle.
    ///
    /// Flat cones: the top point. Spherical cones: `origin + direction *
    /// depth * cos(cutoff)`, behind the origin for obtuse cutoffs.
    pub fn base(&self) -> Vec3 {
        *self.cache.base.get_or_init(|| {
            if self.spherical {
                self.origin + self.direction * (self.depth * self.cos_cutoff())
            } else {
                self.origin + self.direction * self.depth
            }
        })
    }

    /// Radius of the rim circle (infinite for a flat cone at π/2).
    pub fn base_radius(&self) -> f32 {
        if self.spherical {
            self.depth * self.sin_cutoff()
        } else if self.depth == 0.0 {
            0.0
        } else {
            self.depth * self.tan_cutoff()
        }
    }

    /// Largest sphere centered on the axis that fits inside the cone.
    pub fn inner_sphere(&self) -> Sphere {
        self.spheres().0
    }

    /// Small sphere enclosing the whole cone.
    pub fn outer_sphere(&self) -> Sphere {
        self.spheres().1
    }

    fn spheres(&self) -> (Sphere, Sphere) {
        *self.cache.spheres.get_or_init(|| (self.compute_inner_sphere(), self.compute_outer_sphere()))
    }

    fn compute_inner_sphere(&self) -> Sphere {
        let depth = self.depth.max(0.0);
        let ConeTrig { cos, sin, .. } = self.trig();

        if self.spherical && cos <= 0.0 {
            // Obtuse cap: the apex is the nearest point of the excluded back cone
            return Sphere::new(self.origin + self.direction * (depth * 0.5), depth * 0.5);
        }

        // Tangent to the lateral surface (r = d·sin) and to the base or cap (d + r = depth)
        let sin = sin.max(0.0);
        let distance = depth / (1.0 + sin);
        Sphere::new(self.origin + self.direction * distance, distance * sin)
    }

    fn compute_outer_sphere(&self) -> Sphere {
        let depth = self.depth.max(0.0);
        let ConeTrig { cos, sin, .. } = self.trig();

        if self.spherical {
            let around_apex = Sphere::new(self.origin, depth);
            if cos <= 0.0 {
                return around_apex;
            }
            let mut best = around_apex;
            // Through the apex and the rim circle (encloses the cap for any acute cutoff)
            let through_apex = depth / (2.0 * cos);
            if through_apex < best.radius {
                best = Sphere::new(self.origin + self.direction * through_apex, through_apex);
            }
            // Centered on the rim circle, reaches the apex from 45° on
            let on_rim = depth * sin;
            if sin >= cos && on_rim < best.radius {
                best = Sphere::new(self.base(), on_rim);
            }
            return best;
        }

        let rim = self.base_radius();
        if rim <= depth {
            // Through the apex and the rim circle
            let center = (depth * depth + rim * rim) / (2.0 * depth.max(f32::MIN_POSITIVE));
            Sphere::new(self.origin + self.direction * center, center)
        } else {
            Sphere::new(self.base(), rim)
        }
    }

    // ===== VALIDITY =====

    /// Cutoff within the mode range, unit direction and non-negative depth.
    pub fn is_valid(&self) -> bool {
        *self.cache.valid.get_or_init(|| {
            let max_cutoff = if self.spherical { PI } else { FRAC_PI_2 };
            let cutoff_ok = self.cutoff >= 0.0 && self.cutoff <= max_cutoff + EPSILON;
            let direction_ok =
                (self.direction.length_squared() - 1.0).abs() <= UNIT_LENGTH_TOLERANCE;
            let depth_ok = self.depth >= 0.0;
            cutoff_ok && direction_ok && depth_ok
        })
    }

    fn check_valid(&self, query: &str) -> bool {
        let valid = self.is_valid();
        if !valid {
            bounds_warn!(
                SOURCE,
                "{} on an invalid cone (depth {}, cutoff {}, |direction|² {}), reporting Outside",
                query,
                self.depth,
                self.cutoff,
                self.direction.length_squared()
            );
        }
        valid
    }

    // ===== CROSS-SECTION PROFILE =====

    /// Cone-local coordinates of a point: axial depth and distance to the axis.
    pub(crate) fn local(&self, point: Vec3) -> (f32, f32) {
        let offset = point - self.origin;
        let axial = offset.dot(self.direction);
        let radial = (offset.length_squared() - axial * axial).max(0.0).sqrt();
        (axial, radial)
    }

    /// Whether the cross-section point `(axial, radial)` lies in the cone.
    pub(crate) fn profile_contains(&self, axial: f32, radial: f32) -> bool {
        let rho = (axial * axial + radial * radial).sqrt();
        // Angle to the axis within the cutoff
        if axial < rho * self.cos_cutoff() {
            return false;
        }
        if self.spherical {
            rho <= self.depth
        } else {
            axial <= self.depth
        }
    }

    /// Distance from the cross-section point to the cone outline.
    ///
    /// Only the `radial >= 0` half of the outline is measured; the mirrored
    /// half is never closer.
    pub(crate) fn profile_boundary_distance(&self, axial: f32, radial: f32) -> f32 {
        let ConeTrig { cos, sin, .. } = self.trig();
        let depth = self.depth;
        let point = glam::Vec2::new(axial, radial);
        let edge = glam::Vec2::new(cos, sin);

        if self.spherical {
            if self.cutoff >= FULL_BALL_CUTOFF {
                return (point.length() - depth).abs();
            }
            // Lateral edge from the apex to the rim
            let lateral = point.distance(edge * point.dot(edge).clamp(0.0, depth));
            // Spherical cap arc, or its rim end when past the cutoff
            let angle = radial.atan2(axial);
            let cap = if angle <= self.cutoff {
                (point.length() - depth).abs()
            } else {
                point.distance(edge * depth)
            };
            return lateral.min(cap);
        }

        // Lateral edge, unbounded when the base is at infinity
        let lateral_len = if cos <= FLAT_COS_EPSILON { f32::INFINITY } else { depth / cos };
        let lateral = point.distance(edge * point.dot(edge).clamp(0.0, lateral_len));
        // Flat base segment
        let base_radius = self.base_radius();
        let base = point.distance(glam::Vec2::new(depth, radial.clamp(0.0, base_radius)));
        lateral.min(base)
    }

    /// Largest value of `dot(p, dir)` over the cone (support function).
    ///
    /// `dir` does not have to be unit length. The extremal point is the apex,
    /// or the cone surface point obtained by rotating the axis toward `dir`,
    /// at most by the cutoff. May be infinite for a flat cone at π/2.
    pub fn support(&self, dir: Vec3) -> f32 {
        let ConeTrig { cos, sin, .. } = self.trig();
        let apex = self.origin.dot(dir);
        let along = dir.dot(self.direction);
        let across = (dir - self.direction * along).length();

        if self.spherical {
            let len = dir.length();
            // Inside the cutoff the cap point in direction `dir` is reachable
            let reach = if along >= len * cos { len } else { cos * along + sin * across };
            return apex + self.depth * reach.max(0.0);
        }

        let rim = if across <= f32::EPSILON { 0.0 } else { self.base_radius() * across };
        apex.max(apex + self.depth * along + rim)
    }

    // ===== QUERIES =====

    /// Whether `point` lies inside the cone.
    pub fn is_point_seen(&self, point: Vec3) -> bool {
        if !self.check_valid("is_point_seen") {
            return false;
        }
        let (axial, radial) = self.local(point);
        self.profile_contains(axial, radial)
    }

    /// Alias of [`Cone::is_point_seen`].
    pub fn include_point(&self, point: Vec3) -> bool {
        self.is_point_seen(point)
    }

    /// Whether any part of `sphere` lies inside the cone.
    pub fn is_sphere_seen(&self, sphere: &Sphere) -> bool {
        self.clip_sphere(sphere) != ClipResult::Outside
    }

    pub fn intersect_sphere(&self, sphere: &Sphere) -> bool {
        self.is_sphere_seen(sphere)
    }

    /// Where `sphere` lies relative to the cone.
    pub fn clip_sphere(&self, sphere: &Sphere) -> ClipResult {
        if !self.check_valid("clip_sphere") {
            return ClipResult::Outside;
        }
        if !self.outer_sphere().intersect_sphere(sphere) {
            return ClipResult::Outside;
        }
        if self.inner_sphere().include_sphere(sphere) {
            return ClipResult::Inside;
        }

        let (axial, radial) = self.local(sphere.center);
        let boundary = self.profile_boundary_distance(axial, radial);

        if self.profile_contains(axial, radial) {
            if boundary >= sphere.radius { ClipResult::Inside } else { ClipResult::Intersect }
        } else if boundary > sphere.radius {
            ClipResult::Outside
        } else {
            ClipResult::Intersect
        }
    }

    /// Where `aabbox` lies relative to the cone.
    pub fn clip_aabbox(&self, aabbox: &AABBox) -> ClipResult {
        aabbox.clip_cone(self)
    }

    /// Where the cone lies relative to the plane's front half-space.
    pub fn clip_plane(&self, plane: &super::plane::Plane) -> ClipResult {
        plane.clip_cone(self)
    }

    /// Radius of the cross-section disk at `axial` depth (0 outside the cone).
    ///
    /// Behind the apex of an obtuse spherical cone the cross-section is a
    /// ring; its outer radius is reported.
    pub fn radius_at(&self, axial: f32) -> f32 {
        let ConeTrig { cos, sin, tan } = self.trig();

        if !self.spherical {
            return if axial <= 0.0 || axial > self.depth { 0.0 } else { axial * tan };
        }

        if axial.abs() > self.depth {
            return 0.0;
        }
        let sphere_radius = (self.depth * self.depth - axial * axial).max(0.0).sqrt();
        if self.cutoff >= FULL_BALL_CUTOFF {
            return sphere_radius;
        }
        if cos > 0.0 {
            return if axial <= 0.0 { 0.0 } else { sphere_radius.min(axial * tan) };
        }
        if axial >= 0.0 {
            return sphere_radius;
        }
        // Excluded back cone has half-angle π - cutoff
        let excluded = -axial * sin / -cos;
        if sphere_radius > excluded { sphere_radius } else { 0.0 }
    }
}

#[cfg(test)]
#[path = "cone_tests.rs"]
mod tests;
