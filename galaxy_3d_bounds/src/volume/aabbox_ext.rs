/// Axis-aligned box with cached inner/outer radii.
///
/// Sphere tests pre-reject with the circumscribed radius and pre-accept with
/// the inscribed radius before falling back to the exact box test. The radii
/// are refreshed by every setter; code mutating the box through `aabbox_mut`
/// must call `update_radius` afterwards.

use glam::{Mat4, Vec3};
use super::aabbox::AABBox;
use super::clip::ClipResult;
use super::cone::Cone;
use super::sphere::Sphere;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AABBoxExt {
    aabbox: AABBox,
    inner_radius: f32,
    outer_radius: f32,
}

impl AABBoxExt {
    pub fn new(center: Vec3, half_size: Vec3) -> Self {
        Self::from_aabbox(AABBox::new(center, half_size))
    }

    pub fn from_aabbox(aabbox: AABBox) -> Self {
        let mut ext = Self { aabbox, inner_radius: 0.0, outer_radius: 0.0 };
        ext.update_radius();
        ext
    }

    // ===== ACCESSORS =====

    pub fn aabbox(&self) -> &AABBox {
        &self.aabbox
    }

    /// Mutable access to the box. Call `update_radius` after changing the
    /// half-size.
    pub fn aabbox_mut(&mut self) -> &mut AABBox {
        &mut self.aabbox
    }

    pub fn center(&self) -> Vec3 {
        self.aabbox.center
    }

    pub fn half_size(&self) -> Vec3 {
        self.aabbox.half_size
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.aabbox.center = center;
    }

    pub fn set_half_size(&mut self, half_size: Vec3) {
        self.aabbox.half_size = half_size.abs();
        self.update_radius();
    }

    pub fn set_aabbox(&mut self, aabbox: AABBox) {
        self.aabbox = aabbox;
        self.update_radius();
    }

    /// Recompute the cached radii from the current half-size.
    pub fn update_radius(&mut self) {
        self.inner_radius = self.aabbox.inner_radius();
        self.outer_radius = self.aabbox.outer_radius();
    }

    // ===== QUERIES =====

    pub fn include_point(&self, point: Vec3) -> bool {
        self.aabbox.include_point(point)
    }

    pub fn include_sphere(&self, sphere: &Sphere) -> bool {
        // Sphere inside the inscribed sphere
        let slack = self.inner_radius - sphere.radius;
        if slack >= 0.0 && self.aabbox.center.distance_squared(sphere.center) <= slack * slack {
            return true;
        }
        self.aabbox.include_sphere(sphere)
    }

    pub fn intersect_sphere(&self, sphere: &Sphere) -> bool {
        let distance_sq = self.aabbox.center.distance_squared(sphere.center);
        let reach = self.outer_radius + sphere.radius;
        if distance_sq > reach * reach {
            return false;
        }
        let reach = self.inner_radius + sphere.radius;
        if distance_sq <= reach * reach {
            return true;
        }
        self.aabbox.intersect_sphere(sphere)
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

    pub fn clip_aabbox(&self, other: &AABBox) -> ClipResult {
        self.aabbox.clip_aabbox(other)
    }

    pub fn clip_cone(&self, cone: &Cone) -> ClipResult {
        self.aabbox.clip_cone(cone)
    }

    pub fn transformed(&self, matrix: &Mat4) -> AABBoxExt {
        AABBoxExt::from_aabbox(self.aabbox.transformed(matrix))
    }
}

impl From<AABBox> for AABBoxExt {
    fn from(aabbox: AABBox) -> Self {
        Self::from_aabbox(aabbox)
    }
}

#[cfg(test)]
#[path = "aabbox_ext_tests.rs"]
mod tests;
