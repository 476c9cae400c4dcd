/// Line, segment, quad and sphere intersection primitives.
///
/// Lines are `origin + t * dir` with `t` unbounded; segments are `a + t * (b - a)`
/// with `t` in [0, 1]. Directions do not need to be normalized: returned
/// parameters are expressed in units of `dir`.

use glam::Vec3;
use crate::volume::Plane;
use super::{EPSILON, PARALLEL_EPSILON};

/// Finite plane: `center + s * u + t * v` with `s, t` in [-1, 1].
///
/// `u` and `v` are the half-extent vectors of the quad and must be orthogonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub center: Vec3,
    pub u: Vec3,
    pub v: Vec3,
}

impl Quad {
    pub fn new(center: Vec3, u: Vec3, v: Vec3) -> Self {
        Self { center, u, v }
    }

    /// Unnormalized normal (`u × v`).
    pub fn normal(&self) -> Vec3 {
        self.u.cross(self.v)
    }

    /// The four corners, counter-clockwise around the normal.
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.center - self.u - self.v,
            self.center + self.u - self.v,
            self.center + self.u + self.v,
            self.center - self.u + self.v,
        ]
    }

    /// In-plane coordinates `(s, t)` of the projection of `point`.
    fn local(&self, point: Vec3) -> (f32, f32) {
        let offset = point - self.center;
        (
            offset.dot(self.u) / self.u.length_squared(),
            offset.dot(self.v) / self.v.length_squared(),
        )
    }
}

/// Outcome of a line/sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSphereHit {
    /// The line misses the sphere
    None,
    /// The line grazes the sphere (discriminant within `EPSILON` of zero)
    Tangent(f32),
    /// The line enters at the first parameter and leaves at the second
    Secant(f32, f32),
}

/// Intersect an infinite line with an infinite plane.
///
/// Returns the line parameter of the hit. A line parallel to the plane reports
/// `Some(0.0)` when it lies in the plane and `None` otherwise.
pub fn intersect_line_plane(origin: Vec3, dir: Vec3, plane: &Plane) -> Option<f32> {
    let denom = plane.normal.dot(dir);
    let value = plane.dot_coord(origin);

    if denom.abs() <= PARALLEL_EPSILON * plane.normal.length() * dir.length() {
        return if value.abs() <= EPSILON * plane.normal.length() {
            Some(0.0)
        } else {
            None
        };
    }

    Some(-value / denom)
}

/// Intersect an infinite line with a finite quad.
///
/// Returns the parameter where the line first touches the quad. When the line
/// is coplanar with the quad the crossing is an interval; the entry parameter
/// of the in-plane slab clip is reported.
pub fn intersect_line_quad(origin: Vec3, dir: Vec3, quad: &Quad) -> Option<f32> {
    let normal = quad.normal();
    let denom = normal.dot(dir);

    if denom.abs() > PARALLEL_EPSILON * normal.length() * dir.length() {
        let t = normal.dot(quad.center - origin) / denom;
        let (s, w) = quad.local(origin + dir * t);
        return if s.abs() <= 1.0 + EPSILON && w.abs() <= 1.0 + EPSILON {
            Some(t)
        } else {
            None
        };
    }

    // Parallel: only a coplanar line can touch the quad
    if normal.dot(origin - quad.center).abs() > EPSILON * normal.length() {
        return None;
    }

    let (s0, w0) = quad.local(origin);
    let ds = dir.dot(quad.u) / quad.u.length_squared();
    let dw = dir.dot(quad.v) / quad.v.length_squared();

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for (start, step) in [(s0, ds), (w0, dw)] {
        if step.abs() <= PARALLEL_EPSILON {
            if start.abs() > 1.0 + EPSILON {
                return None;
            }
            continue;
        }
        let t0 = (-1.0 - start) / step;
        let t1 = (1.0 - start) / step;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));
        if t_min > t_max {
            return None;
        }
    }

    // Degenerate direction lying on the quad
    if t_min == f32::NEG_INFINITY {
        return Some(0.0);
    }
    Some(t_min)
}

/// Intersect an infinite line with a sphere.
pub fn intersect_line_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> LineSphereHit {
    let a = dir.length_squared();
    if a <= PARALLEL_EPSILON {
        return LineSphereHit::None;
    }

    let oc = origin - center;
    let half_b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    // Discriminant normalized by a² so the tolerance does not depend on |dir|
    let discriminant = (half_b * half_b - a * c) / (a * a);

    if discriminant < -EPSILON {
        LineSphereHit::None
    } else if discriminant < EPSILON {
        LineSphereHit::Tangent(-half_b / a)
    } else {
        let root = discriminant.sqrt();
        let mid = -half_b / a;
        LineSphereHit::Secant(mid - root, mid + root)
    }
}

/// Clip the segment `[a, b]` against the box `[min, max]`.
///
/// Returns the entry and exit parameters in [0, 1], or `None` when the
/// segment misses the box.
pub fn intersect_segment_aabb(a: Vec3, b: Vec3, min: Vec3, max: Vec3) -> Option<(f32, f32)> {
    let dir = b - a;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for axis in 0..3 {
        if dir[axis].abs() <= PARALLEL_EPSILON {
            if a[axis] < min[axis] || a[axis] > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir[axis];
        let t0 = (min[axis] - a[axis]) * inv;
        let t1 = (max[axis] - a[axis]) * inv;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));
        if t_min > t_max {
            return None;
        }
    }

    Some((t_min, t_max))
}

/// Point of the segment `[a, b]` nearest to `point`.
pub fn nearest_point_on_segment(a: Vec3, b: Vec3, point: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Point of the quad nearest to `point`.
pub fn nearest_point_on_quad(quad: &Quad, point: Vec3) -> Vec3 {
    let (s, t) = quad.local(point);
    quad.center + quad.u * s.clamp(-1.0, 1.0) + quad.v * t.clamp(-1.0, 1.0)
}

#[cfg(test)]
#[path = "intersection_tests.rs"]
mod tests;
