/// Oriented bounding boxes.
///
/// `axes` holds the box frame as matrix columns (orthonormal, ordered by
/// decreasing extent when produced by the generator). A point `p` is inside
/// when `|axesᵀ (p − center)| <= half_size` on every axis.

use glam::{Mat3, Mat4, Vec3};
use super::aabbox::{AABBox, CORNER_COUNT, FACE_COUNT};
use super::plane::Plane;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OBBox {
    /// Box frame, one column per axis
    pub axes: Mat3,
    pub center: Vec3,
    pub half_size: Vec3,
}

impl Default for OBBox {
    fn default() -> Self {
        Self { axes: Mat3::IDENTITY, center: Vec3::ZERO, half_size: Vec3::ZERO }
    }
}

impl OBBox {
    pub fn new(axes: Mat3, center: Vec3, half_size: Vec3) -> Self {
        Self { axes, center, half_size: half_size.abs() }
    }

    /// Oriented box with the world axes as frame.
    pub fn from_aabbox(aabbox: &AABBox) -> Self {
        Self::new(Mat3::IDENTITY, aabbox.center, aabbox.half_size)
    }

    /// Box axis `index` (0 = X column, 1 = Y, 2 = Z).
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn axis(&self, index: usize) -> Vec3 {
        assert!(index < 3, "OBBox axis index {} out of range", index);
        self.axes.col(index)
    }

    /// Corners, same bit layout as `AABBox::corner` in the box frame.
    pub fn corners(&self) -> [Vec3; CORNER_COUNT] {
        std::array::from_fn(|index| {
            let sign = Vec3::new(
                if index & 1 == 0 { -1.0 } else { 1.0 },
                if index & 2 == 0 { -1.0 } else { 1.0 },
                if index & 4 == 0 { -1.0 } else { 1.0 },
            );
            self.center + self.axes * (self.half_size * sign)
        })
    }

    /// The six face planes, normals pointing into the box (−axis0, +axis0, ...).
    pub fn planes(&self) -> [Plane; FACE_COUNT] {
        std::array::from_fn(|index| {
            let axis = self.axis(index / 2);
            let half = self.half_size[index / 2];
            if index % 2 == 0 {
                Plane::from_point_normal(self.center - axis * half, axis)
            } else {
                Plane::from_point_normal(self.center + axis * half, -axis)
            }
        })
    }

    pub fn include_point(&self, point: Vec3) -> bool {
        let local = self.axes.transpose() * (point - self.center);
        local.abs().cmple(self.half_size).all()
    }

    /// Radius of the sphere through the corners.
    pub fn outer_radius(&self) -> f32 {
        self.half_size.length()
    }

    /// Tightest axis-aligned box around this box.
    pub fn to_aabbox(&self) -> AABBox {
        let abs_axes = Mat3::from_cols(
            self.axes.x_axis.abs(),
            self.axes.y_axis.abs(),
            self.axes.z_axis.abs(),
        );
        AABBox::new(self.center, abs_axes * self.half_size)
    }

    /// Box under an affine transform.
    ///
    /// Each axis is mapped by the linear part; its length change scales the
    /// matching half-size and the axis is renormalized. Shearing transforms
    /// do not keep the frame orthogonal.
    pub fn transformed(&self, matrix: &Mat4) -> OBBox {
        let linear = Mat3::from_mat4(*matrix);
        let mut axes = [Vec3::ZERO; 3];
        let mut half_size = self.half_size;

        for (i, axis) in axes.iter_mut().enumerate() {
            let mapped = linear * self.axes.col(i);
            let len = mapped.length();
            if len > 0.0 {
                *axis = mapped / len;
                half_size[i] *= len;
            } else {
                *axis = self.axes.col(i);
                half_size[i] = 0.0;
            }
        }

        OBBox::new(
            Mat3::from_cols(axes[0], axes[1], axes[2]),
            matrix.transform_point3(self.center),
            half_size,
        )
    }
}

// ===== OBBOX EXT =====

/// Oriented box with its circumscribed radius cached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OBBoxExt {
    obbox: OBBox,
    radius: f32,
}

impl OBBoxExt {
    pub fn new(axes: Mat3, center: Vec3, half_size: Vec3) -> Self {
        Self::from_obbox(OBBox::new(axes, center, half_size))
    }

    pub fn from_obbox(obbox: OBBox) -> Self {
        let mut ext = Self { obbox, radius: 0.0 };
        ext.update_radius();
        ext
    }

    pub fn obbox(&self) -> &OBBox {
        &self.obbox
    }

    /// Mutable access to the box. Call `update_radius` after changing the
    /// half-size.
    pub fn obbox_mut(&mut self) -> &mut OBBox {
        &mut self.obbox
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_half_size(&mut self, half_size: Vec3) {
        self.obbox.half_size = half_size.abs();
        self.update_radius();
    }

    pub fn update_radius(&mut self) {
        self.radius = self.obbox.outer_radius();
    }

    /// Pre-rejects with the cached radius before the exact box test.
    pub fn include_point(&self, point: Vec3) -> bool {
        if self.obbox.center.distance_squared(point) > self.radius * self.radius {
            return false;
        }
        self.obbox.include_point(point)
    }
}

impl From<OBBox> for OBBoxExt {
    fn from(obbox: OBBox) -> Self {
        Self::from_obbox(obbox)
    }
}

#[cfg(test)]
#[path = "obbox_tests.rs"]
mod tests;
