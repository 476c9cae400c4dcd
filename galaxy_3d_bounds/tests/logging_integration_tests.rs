//! Integration tests for bounds logging
//!
//! These tests check what the volume code reports through the global logger.
//! They swap the logger, so every test runs serially.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_bounds::galaxy3d::bounds::{
    BoundingVolumeGenerator, ClipResult, Cone, Frustum, Plane, Sphere, WireFormat,
};
use galaxy_3d_bounds::galaxy3d::log::{reset_logger, set_logger, Logger, LogEntry, LogSeverity};
use galaxy_3d_bounds::galaxy3d::Error;
use galaxy_3d_bounds::glam::{Mat4, Vec3};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.source == source)
        .cloned()
        .collect()
}

// ============================================================================
// CONE
// ============================================================================

#[test]
#[serial]
fn test_integration_invalid_cone_warns() {
    let (test_logger, entries) = TestLogger::new();
    set_logger(test_logger);

    // Flat cones stop at π/2
    let cone = Cone::new(Vec3::ZERO, Vec3::Z, 5.0, 2.0, false);
    assert!(!cone.is_point_seen(Vec3::new(0.0, 0.0, 1.0)));
    assert_eq!(cone.clip_sphere(&Sphere::new(Vec3::ZERO, 1.0)), ClipResult::Outside);

    let captured = from_source(&entries, "galaxy3d::bounds::Cone");
    assert_eq!(captured.len(), 2);
    assert!(captured.iter().all(|entry| entry.severity == LogSeverity::Warn));
    assert!(captured[0].message.contains("is_point_seen"));
    assert!(captured[1].message.contains("clip_sphere"));

    reset_logger();
}

#[test]
#[serial]
fn test_integration_frustum_warns_once_for_invalid_cone() {
    let (test_logger, entries) = TestLogger::new();
    set_logger(test_logger);

    let projection = Mat4::perspective_rh(1.2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let frustum = Frustum::from_projection_view(&projection, &view);
    let cone = Cone::new(Vec3::new(0.0, 0.0, -20.0), Vec3::NEG_Z, 1.0, 2.0, false);

    assert_eq!(frustum.clip_cone(&cone), ClipResult::Outside);

    let captured = from_source(&entries, "galaxy3d::bounds::Frustum");
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Warn);
    assert!(captured[0].message.contains("invalid cone"));
    // Rejected before any plane is tested
    assert!(from_source(&entries, "galaxy3d::bounds::Plane").is_empty());

    reset_logger();
}

#[test]
#[serial]
fn test_integration_valid_cone_is_silent() {
    let (test_logger, entries) = TestLogger::new();
    set_logger(test_logger);

    let cone = Cone::new(Vec3::ZERO, Vec3::Z, 5.0, 0.5, false);
    assert!(cone.is_point_seen(Vec3::new(0.0, 0.0, 1.0)));
    assert_eq!(Plane::new(Vec3::Z, 1.0).clip_cone(&cone), ClipResult::Inside);

    assert!(from_source(&entries, "galaxy3d::bounds::Cone").is_empty());
    assert!(from_source(&entries, "galaxy3d::bounds::Plane").is_empty());

    reset_logger();
}

// ============================================================================
// WIRE
// ============================================================================

#[test]
#[serial]
fn test_integration_corrupt_cone_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    set_logger(test_logger);

    let mut bytes = Vec::new();
    Cone::default().write_to(&mut bytes).unwrap();
    bytes[32] = 2;
    let result = Cone::read_from(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(Error::InvalidData(_))));

    let captured = from_source(&entries, "galaxy3d::bounds::wire");
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert!(captured[0].message.contains("flag 2"));
    assert!(captured[0].file.is_some());
    assert!(captured[0].line.is_some());

    reset_logger();
}

// ============================================================================
// GENERATOR
// ============================================================================

#[test]
#[serial]
fn test_integration_generator_reports_passes() {
    let (test_logger, entries) = TestLogger::new();
    set_logger(test_logger);

    let points = [Vec3::ZERO, Vec3::new(4.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 3.0)];
    assert!(BoundingVolumeGenerator::from_points(&points).is_some());

    let captured = from_source(&entries, "galaxy3d::bounds::BoundingVolumeGenerator");
    assert_eq!(captured.len(), 3);
    assert!(captured.iter().all(|entry| entry.severity == LogSeverity::Debug));
    assert!(captured[0].message.starts_with("Pass 1 done"));
    assert!(captured[1].message.starts_with("Pass 2 done"));
    assert!(captured[2].message.starts_with("Pass 3 done"));

    reset_logger();
}

#[test]
#[serial]
fn test_integration_generator_warns_on_empty_pass() {
    let (test_logger, entries) = TestLogger::new();
    set_logger(test_logger);

    let mut generator = BoundingVolumeGenerator::new();
    generator.flush_first_pass(0);
    assert_eq!(generator.average(), Vec3::ZERO);

    let captured = from_source(&entries, "galaxy3d::bounds::BoundingVolumeGenerator");
    assert!(captured
        .iter()
        .any(|entry| entry.severity == LogSeverity::Warn && entry.message.contains("no points")));

    reset_logger();
}
