use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use glam::{Mat3, Mat4, Vec3};
use super::*;

/// 90° perspective camera at (0, 0, 5) looking at the origin.
///
/// At the origin (5 units away) the visible half width is 5.
fn camera_frustum() -> Frustum {
    let projection = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_projection_view(&projection, &view)
}

fn assert_unit_normals(frustum: &Frustum) {
    for plane in frustum.planes() {
        assert!((plane.normal.length() - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_frustum_from_identity_matrix() {
    // Identity VP → NDC cube: x,y,z in [-1, 1]
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    assert_unit_normals(&frustum);
    assert!(frustum.include_point(Vec3::new(0.9, -0.9, 0.5)));
    assert!(!frustum.include_point(Vec3::new(1.1, 0.0, 0.0)));
}

#[test]
fn test_frustum_from_perspective_projection() {
    let projection = Mat4::perspective_rh(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    assert_unit_normals(&Frustum::from_view_projection(&(projection * view)));
}

#[test]
fn test_frustum_from_orthographic_projection() {
    let projection = Mat4::orthographic_rh(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection);
    assert_unit_normals(&frustum);
    assert!(frustum.include_point(Vec3::new(-9.9, 9.9, -50.0)));
    assert!(!frustum.include_point(Vec3::new(-10.1, 0.0, -50.0)));
}

#[test]
fn test_frustum_projection_view_matches_combined() {
    let projection = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    assert_eq!(
        Frustum::from_projection_view(&projection, &view),
        Frustum::from_view_projection(&(projection * view))
    );
}

#[test]
fn test_frustum_plane_accessor() {
    let frustum = camera_frustum();
    // Right plane faces -X-ish, left plane +X-ish
    assert!(frustum.plane(PLANE_RIGHT).normal.x < 0.0);
    assert!(frustum.plane(PLANE_LEFT).normal.x > 0.0);
    assert!(frustum.plane(PLANE_TOP).normal.y < 0.0);
    assert!(frustum.plane(PLANE_BOTTOM).normal.y > 0.0);
    assert_eq!(frustum.plane(PLANE_FAR), &frustum.planes()[PLANE_FAR]);
    assert_eq!(frustum.plane(PLANE_NEAR), &frustum.planes()[PLANE_NEAR]);
}

#[test]
#[should_panic]
fn test_frustum_plane_out_of_range_panics() {
    camera_frustum().plane(6);
}

#[test]
fn test_frustum_from_planes_normalizes() {
    let planes = [Plane::new(Vec3::new(0.0, 0.0, 2.0), 4.0); 6];
    assert_unit_normals(&Frustum::from_planes(planes));
}

// ============================================================================
// Points
// ============================================================================

#[test]
fn test_frustum_point_classification() {
    let frustum = camera_frustum();
    assert!(frustum.include_point(Vec3::ZERO));
    assert_eq!(frustum.clip_point(Vec3::ZERO), ClipResult::Inside);
    // Behind the camera
    assert_eq!(frustum.clip_point(Vec3::new(0.0, 0.0, 10.0)), ClipResult::Outside);
    // Beyond the far plane
    assert_eq!(frustum.clip_point(Vec3::new(0.0, 0.0, -200.0)), ClipResult::Outside);
    assert!(!frustum.include_point(Vec3::new(0.0, 0.0, -200.0)));
}

// ============================================================================
// Spheres
// ============================================================================

#[test]
fn test_frustum_clip_sphere() {
    let frustum = camera_frustum();
    assert_eq!(frustum.clip_sphere(&Sphere::new(Vec3::ZERO, 1.0)), ClipResult::Inside);
    assert_eq!(frustum.clip_sphere(&Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0)), ClipResult::Intersect);
    assert_eq!(frustum.clip_sphere(&Sphere::new(Vec3::new(100.0, 0.0, 0.0), 1.0)), ClipResult::Outside);
}

#[test]
fn test_frustum_clip_sphere_light_ignores_depth() {
    let frustum = camera_frustum();
    let far_away = Sphere::new(Vec3::new(0.0, 0.0, -200.0), 1.0);
    assert_eq!(frustum.clip_sphere(&far_away), ClipResult::Outside);
    assert_eq!(frustum.clip_sphere_light(&far_away), ClipResult::Inside);
}

// ============================================================================
// Axis-aligned boxes
// ============================================================================

#[test]
fn test_aabbox_inside_frustum() {
    let frustum = camera_frustum();
    let aabbox = AABBox::new(Vec3::ZERO, Vec3::ONE);
    assert_eq!(frustum.clip_aabbox(&aabbox), ClipResult::Inside);
}

#[test]
fn test_aabbox_outside_frustum() {
    let frustum = camera_frustum();
    let aabbox = AABBox::from_min_max(Vec3::splat(100.0), Vec3::splat(101.0));
    assert_eq!(frustum.clip_aabbox(&aabbox), ClipResult::Outside);
}

#[test]
fn test_aabbox_behind_camera() {
    let frustum = camera_frustum();
    let aabbox = AABBox::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ONE);
    assert_eq!(frustum.clip_aabbox(&aabbox), ClipResult::Outside);
}

#[test]
fn test_aabbox_straddling_frustum_side() {
    let frustum = camera_frustum();
    let aabbox = AABBox::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
    assert_eq!(frustum.clip_aabbox(&aabbox), ClipResult::Intersect);
}

#[test]
fn test_aabbox_light_ignores_far_plane() {
    let frustum = camera_frustum();
    let aabbox = AABBox::new(Vec3::new(0.0, 0.0, -200.0), Vec3::ONE);
    assert_eq!(frustum.clip_aabbox(&aabbox), ClipResult::Outside);
    assert_eq!(frustum.clip_aabbox_light(&aabbox), ClipResult::Inside);
}

// ============================================================================
// Oriented boxes
// ============================================================================

#[test]
fn test_frustum_clip_obbox() {
    let frustum = camera_frustum();
    let rotation = Mat3::from_rotation_z(FRAC_PI_4);
    let centered = OBBox::new(rotation, Vec3::ZERO, Vec3::ONE);
    let straddling = OBBox::new(rotation, Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
    let far = OBBox::new(rotation, Vec3::new(100.0, 0.0, 0.0), Vec3::ONE);
    assert_eq!(frustum.clip_obbox(&centered), ClipResult::Inside);
    assert_eq!(frustum.clip_obbox(&straddling), ClipResult::Intersect);
    assert_eq!(frustum.clip_obbox(&far), ClipResult::Outside);
}

#[test]
fn test_frustum_clip_obbox_matches_aabbox_for_world_axes() {
    let frustum = camera_frustum();
    for center in [Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0)] {
        let aabbox = AABBox::new(center, Vec3::new(1.0, 2.0, 0.5));
        assert_eq!(frustum.clip_obbox(&OBBox::from_aabbox(&aabbox)), frustum.clip_aabbox(&aabbox));
    }
    let obbox = OBBox::from_aabbox(&AABBox::new(Vec3::new(0.0, 0.0, -200.0), Vec3::ONE));
    assert_eq!(frustum.clip_obbox_light(&obbox), ClipResult::Inside);
}

// ============================================================================
// Cones
// ============================================================================

#[test]
fn test_frustum_clip_cone() {
    let frustum = camera_frustum();
    let small = Cone::new(Vec3::ZERO, Vec3::NEG_Z, 2.0, 0.3, false);
    let crossing = Cone::new(Vec3::ZERO, Vec3::X, 10.0, 0.3, false);
    let far = Cone::new(Vec3::new(100.0, 0.0, 0.0), Vec3::X, 2.0, 0.3, false);
    assert_eq!(frustum.clip_cone(&small), ClipResult::Inside);
    assert_eq!(frustum.clip_cone(&crossing), ClipResult::Intersect);
    assert_eq!(frustum.clip_cone(&far), ClipResult::Outside);
}

#[test]
fn test_frustum_clip_cone_light() {
    let frustum = camera_frustum();
    let deep = Cone::new(Vec3::new(0.0, 0.0, -200.0), Vec3::NEG_Z, 2.0, 0.3, true);
    assert_eq!(frustum.clip_cone(&deep), ClipResult::Outside);
    assert_eq!(frustum.clip_cone_light(&deep), ClipResult::Inside);
}

#[test]
fn test_frustum_clip_cone_invalid_is_outside() {
    let frustum = camera_frustum();
    // Flat cones stop at π/2; the outer sphere alone sits well inside the view
    let invalid = Cone::new(Vec3::new(0.0, 0.0, -20.0), Vec3::NEG_Z, 1.0, 2.0, false);
    assert!(!invalid.is_valid());
    assert_eq!(frustum.clip_sphere(&invalid.outer_sphere()), ClipResult::Inside);

    assert_eq!(frustum.clip_cone(&invalid), ClipResult::Outside);
    assert_eq!(frustum.clip_cone_light(&invalid), ClipResult::Outside);
}
