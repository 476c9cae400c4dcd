use glam::{Mat3, Vec3};
use crate::volume::{AABBox, OBBox};
use super::*;

fn box_corners(aabbox: &AABBox) -> Vec<Vec3> {
    aabbox.corners().to_vec()
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
}

// ============================================================================
// from_points
// ============================================================================

#[test]
fn test_generator_reproduces_box_from_corners() {
    let source = AABBox::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
    let volumes = BoundingVolumeGenerator::from_points(&box_corners(&source)).unwrap();
    assert_eq!(volumes.aabbox, source);
}

#[test]
fn test_generator_empty_point_set() {
    assert_eq!(BoundingVolumeGenerator::from_points(&[]), None);
}

#[test]
fn test_generator_oriented_box_axes_by_decreasing_extent() {
    let source = AABBox::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
    let volumes = BoundingVolumeGenerator::from_points(&box_corners(&source)).unwrap();
    let obbox = volumes.obbox;

    assert_close(obbox.axis(0).z.abs(), 1.0);
    assert_close(obbox.axis(1).y.abs(), 1.0);
    assert_close(obbox.axis(2).x.abs(), 1.0);
    assert!((obbox.half_size - Vec3::new(4.0, 3.0, 2.0)).length() < 1e-4);
    assert!(obbox.center.length() < 1e-4);
}

#[test]
fn test_generator_oriented_box_frame_right_handed() {
    let source = AABBox::new(Vec3::ONE, Vec3::new(1.0, 5.0, 2.0));
    let obbox = BoundingVolumeGenerator::from_points(&box_corners(&source)).unwrap().obbox;
    let handedness = obbox.axis(0).cross(obbox.axis(1)).dot(obbox.axis(2));
    assert_close(handedness, 1.0);
}

#[test]
fn test_generator_fits_rotated_box() {
    let rotation = Mat3::from_rotation_z(0.5);
    let source = OBBox::new(rotation, Vec3::new(10.0, -3.0, 2.0), Vec3::new(5.0, 1.0, 0.5));
    let points = source.corners();

    let obbox = BoundingVolumeGenerator::from_points(&points).unwrap().obbox;
    assert_close(obbox.axis(0).dot(rotation.x_axis).abs(), 1.0);
    assert!((obbox.half_size - source.half_size).length() < 1e-3);
    assert!((obbox.center - source.center).length() < 1e-3);
    for point in points {
        let grown = OBBox::new(obbox.axes, obbox.center, obbox.half_size + Vec3::splat(1e-3));
        assert!(grown.include_point(point));
    }
}

#[test]
fn test_generator_sphere_encloses_every_point() {
    let points: Vec<Vec3> = (0..64)
        .map(|i| {
            let t = i as f32 * 0.37;
            Vec3::new(t.sin() * 4.0, (t * 1.3).cos() * 2.0, (t * 0.7).sin() * 7.0 + 1.0)
        })
        .collect();
    let sphere = BoundingVolumeGenerator::from_points(&points).unwrap().sphere;
    for point in &points {
        assert!(sphere.center.distance(*point) <= sphere.radius + 1e-4);
    }
}

#[test]
fn test_generator_single_point() {
    let point = Vec3::new(1.0, 2.0, 3.0);
    let volumes = BoundingVolumeGenerator::from_points(&[point]).unwrap();
    assert_eq!(volumes.aabbox, AABBox::new(point, Vec3::ZERO));
    assert_eq!(volumes.sphere.center, point);
    assert_eq!(volumes.sphere.radius, 0.0);
    assert!((volumes.obbox.center - point).length() < 1e-5);
    assert!(volumes.obbox.half_size.length() < 1e-5);
}

// ============================================================================
// Pass by pass
// ============================================================================

#[test]
fn test_generator_aabbox_ready_after_first_pass() {
    let mut generator = BoundingVolumeGenerator::new();
    generator.add_first_pass(Vec3::new(-1.0, 0.0, 0.0));
    generator.add_first_pass(Vec3::new(3.0, 2.0, 4.0));
    generator.flush_first_pass(2);
    assert_eq!(generator.average(), Vec3::new(1.0, 1.0, 2.0));
    assert_eq!(
        generator.axis_aligned_bounding_box(),
        AABBox::from_min_max(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 4.0))
    );
}

#[test]
fn test_generator_ritter_pass_grows_seed_sphere() {
    // Primary axis along X: the seed sphere spans x in [-5, 5]
    let points = [
        Vec3::new(-5.0, 0.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(0.0, 4.9, 0.0),
        Vec3::new(0.0, -4.9, 0.0),
        Vec3::new(0.0, 0.0, 6.0),
    ];
    let mut generator = BoundingVolumeGenerator::new();
    points.iter().for_each(|p| generator.add_first_pass(*p));
    generator.flush_first_pass(points.len());
    points.iter().for_each(|p| generator.add_second_pass(*p));
    generator.flush_second_pass(points.len());
    points.iter().for_each(|p| generator.add_third_pass(*p));
    generator.flush_third_pass();

    let seed = generator.bounding_sphere();
    points.iter().for_each(|p| generator.add_fourth_pass(*p));
    let refined = generator.bounding_sphere();

    assert!(refined.radius >= seed.radius);
    for point in &points {
        assert!(refined.center.distance(*point) <= refined.radius + 1e-4);
    }
}

#[test]
fn test_generator_fourth_pass_ignores_inner_points() {
    let points = box_corners(&AABBox::new(Vec3::ZERO, Vec3::ONE));
    let mut generator = BoundingVolumeGenerator::new();
    points.iter().for_each(|p| generator.add_first_pass(*p));
    generator.flush_first_pass(points.len());
    points.iter().for_each(|p| generator.add_second_pass(*p));
    generator.flush_second_pass(points.len());
    points.iter().for_each(|p| generator.add_third_pass(*p));
    generator.flush_third_pass();
    points.iter().for_each(|p| generator.add_fourth_pass(*p));

    let before = generator.bounding_sphere();
    generator.add_fourth_pass(Vec3::ZERO);
    assert_eq!(generator.bounding_sphere(), before);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "out of order")]
fn test_generator_out_of_order_pass_panics_in_debug() {
    let mut generator = BoundingVolumeGenerator::new();
    generator.add_second_pass(Vec3::ONE);
}
