/// BoundingVolumeGenerator — fits bounding volumes to a point stream.
///
/// The generator is driven in four passes over the same points:
///
/// 1. `add_first_pass` for every point, then `flush_first_pass(n)`:
///    min/max and average. The axis-aligned box is ready.
/// 2. `add_second_pass`, then `flush_second_pass(n)`: covariance around the
///    average, eigen-decomposed into the oriented box axes.
/// 3. `add_third_pass`, then `flush_third_pass()`: extents along each axis.
///    The oriented box and a first bounding sphere are ready.
/// 4. `add_fourth_pass` (optional): Ritter expansion of the sphere.
///
/// Readers do not check the pass state: reading a volume before its pass is
/// flushed returns whatever was accumulated so far. Pass order itself is
/// checked in debug builds.

use glam::{Mat3, Vec3};
use nalgebra::Matrix3;
use crate::bounds_debug;
use crate::bounds_warn;
use crate::volume::{AABBox, OBBox, Sphere};

const SOURCE: &str = "galaxy3d::bounds::BoundingVolumeGenerator";

/// Pass currently accepting points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    First,
    Second,
    Third,
    Fourth,
}

/// The three volumes fitted to one point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolumes {
    pub aabbox: AABBox,
    pub obbox: OBBox,
    pub sphere: Sphere,
}

#[derive(Debug, Clone)]
pub struct BoundingVolumeGenerator {
    pass: Pass,
    /// Running minimum (pass 1)
    min: Vec3,
    /// Running maximum (pass 1)
    max: Vec3,
    /// Running sum, then average (pass 1)
    sum: Vec3,
    average: Vec3,
    /// Upper triangle accumulated, mirrored on flush (pass 2)
    covariance: Matrix3<f32>,
    /// Eigen axes by decreasing variance (pass 2)
    axes: [Vec3; 3],
    /// Per-axis projection range (pass 3)
    axis_min: Vec3,
    axis_max: Vec3,
    /// Extremal points along the primary axis (pass 3)
    primary_min_point: Vec3,
    primary_max_point: Vec3,
    /// Oriented box center and half-size (pass 3)
    obbox_center: Vec3,
    obbox_half_size: Vec3,
    sphere: Sphere,
}

impl Default for BoundingVolumeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingVolumeGenerator {
    pub fn new() -> Self {
        Self {
            pass: Pass::First,
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
            sum: Vec3::ZERO,
            average: Vec3::ZERO,
            covariance: Matrix3::zeros(),
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            axis_min: Vec3::splat(f32::INFINITY),
            axis_max: Vec3::splat(f32::NEG_INFINITY),
            primary_min_point: Vec3::ZERO,
            primary_max_point: Vec3::ZERO,
            obbox_center: Vec3::ZERO,
            obbox_half_size: Vec3::ZERO,
            sphere: Sphere::default(),
        }
    }

    /// Fit every volume to `points`, running all four passes.
    ///
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[Vec3]) -> Option<BoundingVolumes> {
        if points.is_empty() {
            return None;
        }

        let mut generator = Self::new();
        for &point in points {
            generator.add_first_pass(point);
        }
        generator.flush_first_pass(points.len());
        for &point in points {
            generator.add_second_pass(point);
        }
        generator.flush_second_pass(points.len());
        for &point in points {
            generator.add_third_pass(point);
        }
        generator.flush_third_pass();
        for &point in points {
            generator.add_fourth_pass(point);
        }

        Some(BoundingVolumes {
            aabbox: generator.axis_aligned_bounding_box(),
            obbox: generator.oriented_bounding_box(),
            sphere: generator.bounding_sphere(),
        })
    }

    // ===== PASS 1: MIN / MAX / AVERAGE =====

    pub fn add_first_pass(&mut self, point: Vec3) {
        debug_assert_eq!(self.pass, Pass::First, "add_first_pass called out of order");
        self.min = self.min.min(point);
        self.max = self.max.max(point);
        self.sum += point;
    }

    /// Close pass 1 over `count` points.
    pub fn flush_first_pass(&mut self, count: usize) {
        debug_assert_eq!(self.pass, Pass::First, "flush_first_pass called out of order");
        if count == 0 {
            bounds_warn!(SOURCE, "flush_first_pass with no points, average left at origin");
        } else {
            self.average = self.sum / count as f32;
        }
        self.pass = Pass::Second;
        bounds_debug!(SOURCE, "Pass 1 done: {} points, min {:?}, max {:?}", count, self.min, self.max);
    }

    // ===== PASS 2: COVARIANCE / AXES =====

    pub fn add_second_pass(&mut self, point: Vec3) {
        debug_assert_eq!(self.pass, Pass::Second, "add_second_pass called out of order");
        let v = point - self.average;
        let c = &mut self.covariance;
        c[(0, 0)] += v.x * v.x; c[(0, 1)] += v.x * v.y; c[(0, 2)] += v.x * v.z;
        c[(1, 1)] += v.y * v.y; c[(1, 2)] += v.y * v.z;
        c[(2, 2)] += v.z * v.z;
    }

    /// Close pass 2 over `count` points: normalize and mirror the covariance,
    /// then take its eigenvectors as box axes by decreasing eigenvalue.
    pub fn flush_second_pass(&mut self, count: usize) {
        debug_assert_eq!(self.pass, Pass::Second, "flush_second_pass called out of order");
        if count > 0 {
            self.covariance /= count as f32;
        }
        let c = &mut self.covariance;
        c[(1, 0)] = c[(0, 1)];
        c[(2, 0)] = c[(0, 2)];
        c[(2, 1)] = c[(1, 2)];

        let eig = self.covariance.symmetric_eigen();
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));

        for (axis, &k) in self.axes.iter_mut().zip(order.iter()) {
            let column = eig.eigenvectors.column(k);
            *axis = Vec3::new(column[0], column[1], column[2]).normalize_or_zero();
        }
        // Failed decomposition (NaN input)
        if self.axes.iter().any(|axis| *axis == Vec3::ZERO) {
            self.axes = [Vec3::X, Vec3::Y, Vec3::Z];
        }
        // Right-handed frame
        if self.axes[0].cross(self.axes[1]).dot(self.axes[2]) < 0.0 {
            self.axes[2] = -self.axes[2];
        }

        self.axis_min = Vec3::splat(f32::INFINITY);
        self.axis_max = Vec3::splat(f32::NEG_INFINITY);
        self.pass = Pass::Third;
        bounds_debug!(
            SOURCE,
            "Pass 2 done: eigenvalues {:?}, axes {:?}",
            order.map(|k| eig.eigenvalues[k]),
            self.axes
        );
    }

    // ===== PASS 3: EXTENTS =====

    pub fn add_third_pass(&mut self, point: Vec3) {
        debug_assert_eq!(self.pass, Pass::Third, "add_third_pass called out of order");
        for (i, axis) in self.axes.iter().enumerate() {
            let projection = axis.dot(point);
            if projection < self.axis_min[i] {
                self.axis_min[i] = projection;
                if i == 0 {
                    self.primary_min_point = point;
                }
            }
            if projection > self.axis_max[i] {
                self.axis_max[i] = projection;
                if i == 0 {
                    self.primary_max_point = point;
                }
            }
        }
    }

    /// Close pass 3: oriented box from the projection ranges, sphere seeded
    /// from the primary axis' extremal points.
    pub fn flush_third_pass(&mut self) {
        debug_assert_eq!(self.pass, Pass::Third, "flush_third_pass called out of order");
        let middle = (self.axis_min + self.axis_max) * 0.5;
        self.obbox_center = self.axes[0] * middle.x + self.axes[1] * middle.y + self.axes[2] * middle.z;
        self.obbox_half_size = ((self.axis_max - self.axis_min) * 0.5).max(Vec3::ZERO);

        self.sphere = Sphere::new(
            (self.primary_min_point + self.primary_max_point) * 0.5,
            self.primary_min_point.distance(self.primary_max_point) * 0.5,
        );
        self.pass = Pass::Fourth;
        bounds_debug!(SOURCE, "Pass 3 done: sphere seed {:?}", self.sphere);
    }

    // ===== PASS 4: SPHERE REFINEMENT =====

    /// Grow the sphere to hold `point` (Ritter): the new sphere touches the
    /// old one on the far side and passes through the point.
    pub fn add_fourth_pass(&mut self, point: Vec3) {
        debug_assert_eq!(self.pass, Pass::Fourth, "add_fourth_pass called out of order");
        let distance = self.sphere.center.distance(point);
        if distance <= self.sphere.radius {
            return;
        }
        let radius = (self.sphere.radius + distance) * 0.5;
        let center = self.sphere.center
            + (point - self.sphere.center) * ((radius - self.sphere.radius) / distance);
        self.sphere = Sphere::new(center, radius);
    }

    // ===== READERS =====

    /// Available after pass 1.
    pub fn axis_aligned_bounding_box(&self) -> AABBox {
        AABBox::from_min_max(self.min, self.max)
    }

    /// Available after pass 3. Axes are ordered by decreasing variance.
    pub fn oriented_bounding_box(&self) -> OBBox {
        OBBox::new(
            Mat3::from_cols(self.axes[0], self.axes[1], self.axes[2]),
            self.obbox_center,
            self.obbox_half_size,
        )
    }

    /// Available after pass 3, refined by pass 4.
    pub fn bounding_sphere(&self) -> Sphere {
        self.sphere
    }

    /// Average point, available after pass 1.
    pub fn average(&self) -> Vec3 {
        self.average
    }
}

#[cfg(test)]
#[path = "bounding_volume_generator_tests.rs"]
mod tests;
