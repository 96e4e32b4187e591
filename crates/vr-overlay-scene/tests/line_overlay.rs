use std::f32::consts::FRAC_PI_2;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use vr_overlay_config::{OverlayConfig, TrackingOrigin};
use vr_overlay_math::{Transform3D, Vector3};
use vr_overlay_scene::{transform_from_hmd, LineOverlay, OverlayError, RecordingRuntime};

#[test]
fn test_base_line_scale_is_length_over_width() {
    let line = LineOverlay::new(
        "base",
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, -2.0),
        0.002,
    );

    let pose = line.pose();
    assert_relative_eq!(pose.basis.scale().y, 1000.0, max_relative = 1e-5);
    assert_relative_eq!(pose.basis.scale().x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(pose.basis.scale().z, 1.0, epsilon = 1e-6);
}

#[test]
fn test_pose_matches_explicit_call_chain() {
    let start = Vector3::new(0.5, 1.2, -0.3);
    let end = Vector3::new(-1.0, 1.4, -2.0);
    let line = LineOverlay::new("chain", start, end, 0.004);
    let length = start.distance_to(&end);

    let expected = Transform3D::IDENTITY
        .translated(&start)
        .looking_at(&end, &Vector3::UP)
        .translated_local(&(Vector3::FORWARD * (length / 2.0)))
        .rotated_local(&Vector3::RIGHT, -FRAC_PI_2)
        .scaled_local(&Vector3::new(1.0, length / 0.004, 1.0));

    assert_eq!(line.pose(), expected);
}

#[test]
fn test_quad_edges_hit_endpoints() {
    let start = Vector3::new(2.0, 0.0, 1.0);
    let end = Vector3::new(-1.0, 3.0, -4.0);
    let width = 0.01;
    let pose = LineOverlay::new("edges", start, end, width).pose();

    // the unit quad spans [-width/2, width/2] along its local Y
    let top = pose * Vector3::new(0.0, width / 2.0, 0.0);
    let bottom = pose * Vector3::new(0.0, -width / 2.0, 0.0);
    assert_abs_diff_eq!(top, end, epsilon = 1e-4);
    assert_abs_diff_eq!(bottom, start, epsilon = 1e-4);
}

#[test]
fn test_sync_round_trips_through_interop() -> anyhow::Result<()> {
    let config = OverlayConfig::new().with_tracking_origin(TrackingOrigin::Seated);
    let mut runtime = RecordingRuntime::new();
    let mut line = LineOverlay::from_config(
        "line.sync",
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(1.0, 1.0, -1.0),
        &config.line,
    );

    line.sync(&mut runtime, &config)?;

    let handle = line.handle().ok_or_else(|| anyhow::anyhow!("no handle"))?;
    let state = runtime
        .state(handle)
        .ok_or_else(|| anyhow::anyhow!("no state for {handle}"))?;
    assert_eq!(state.origin, Some(TrackingOrigin::Seated));
    assert_eq!(state.width_in_meters, Some(config.line.width_in_meters));

    let matrix = state.transform.ok_or_else(|| anyhow::anyhow!("no transform"))?;
    assert_eq!(transform_from_hmd(&matrix), line.pose());
    Ok(())
}

#[test]
fn test_strict_config_rejects_vertical_line() {
    let config = OverlayConfig::new().with_strict_geometry(true);
    let mut runtime = RecordingRuntime::new();
    let mut line = LineOverlay::from_config(
        "pole",
        Vector3::ZERO,
        Vector3::new(0.0, 2.0, 0.0),
        &config.line,
    );

    let err = line.sync(&mut runtime, &config).unwrap_err();
    assert!(matches!(err, OverlayError::DegenerateSegment { .. }));

    // the same line is accepted once up is moved off its axis
    let config = config.with_up(Vector3::BACK);
    line.sync(&mut runtime, &config).unwrap();
}
