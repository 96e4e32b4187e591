//! Cross-type properties of the algebra.

use std::f32::consts::{FRAC_PI_2, PI};

use approx::{assert_abs_diff_eq, assert_relative_eq};
use vr_overlay_math::{Basis, Quaternion, Transform3D, Vector2, Vector3};

fn sample_vectors() -> Vec<Vector3> {
    vec![
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(-0.001, 0.0, 0.002),
        Vector3::new(1e4, -2e4, 3e3),
        Vector3::new(0.0, 0.0, -7.5),
        Vector3::ONE,
    ]
}

fn sample_rotations() -> Vec<Quaternion> {
    vec![
        Quaternion::IDENTITY,
        Quaternion::from_axis_angle(&Vector3::UP, 0.4),
        Quaternion::from_axis_angle(&Vector3::RIGHT, PI),
        Quaternion::from_axis_angle(&Vector3::new(1.0, -1.0, 2.0).normalized(), 2.9),
        Quaternion::from_axis_angle(&Vector3::new(0.3, 0.9, -0.2).normalized(), -1.7),
        Quaternion::from_euler(&Vector3::new(0.5, -2.5, 3.0)),
    ]
}

fn rigid_transform() -> Transform3D {
    Transform3D::IDENTITY
        .rotated(&Vector3::new(0.2, 1.0, -0.4).normalized(), 1.1)
        .translated(&Vector3::new(3.0, -1.0, 0.5))
}

fn affine_transform() -> Transform3D {
    rigid_transform()
        .scaled_local(&Vector3::new(2.0, 0.25, -1.5))
        .rotated_local(&Vector3::BACK, 0.3)
}

#[test]
fn test_normalized_has_unit_length() {
    for v in sample_vectors() {
        assert_relative_eq!(v.normalized().length(), 1.0, epsilon = 1e-6);
    }
    assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);

    assert_relative_eq!(Vector2::new(3.0, -4.0).normalized().length(), 1.0, epsilon = 1e-6);
    assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
}

#[test]
fn test_rigid_inverse_is_identity() {
    let t = rigid_transform();
    assert!(t.basis.is_orthonormal());
    assert_abs_diff_eq!(t * t.inverse(), Transform3D::IDENTITY, epsilon = 1e-5);
}

#[test]
fn test_affine_inverse_is_identity() {
    let t = affine_transform();
    assert_abs_diff_eq!(t * t.affine_inverse(), Transform3D::IDENTITY, epsilon = 1e-5);
    assert_abs_diff_eq!(t.affine_inverse() * t, Transform3D::IDENTITY, epsilon = 1e-5);
}

#[test]
fn test_composition_is_associative_on_points() {
    let a = affine_transform();
    let b = rigid_transform().looking_at(&Vector3::new(-2.0, 4.0, 1.0), &Vector3::UP);
    for p in sample_vectors().into_iter().take(2) {
        assert_abs_diff_eq!((a * b) * p, a * (b * p), epsilon = 1e-4);
    }
}

#[test]
fn test_quaternion_basis_round_trip_up_to_sign() {
    for q in sample_rotations() {
        let back = Basis::from_quaternion(&q).get_rotation_quaternion();
        assert_relative_eq!(back.dot(&q).abs(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_rotation_extraction_ignores_scale() {
    for q in sample_rotations() {
        let scaled = Basis::from_quaternion_scale(&q, &Vector3::new(0.5, 3.0, 1.25));
        let back = scaled.get_rotation_quaternion();
        assert_relative_eq!(back.dot(&q).abs(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(scaled.scale(), Vector3::new(0.5, 3.0, 1.25), epsilon = 1e-5);
    }
}

#[test]
fn test_lerp_endpoints_are_exact() {
    let a = Vector3::new(0.1, -7.3, 1e5);
    let b = Vector3::new(3.3, 0.7, -2.0);
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);

    let a2 = Vector2::new(0.1, -7.3);
    let b2 = Vector2::new(3.3, 0.7);
    assert_eq!(a2.lerp(&b2, 0.0), a2);
    assert_eq!(a2.lerp(&b2, 1.0), b2);
}

#[test]
fn test_transform_interpolation_endpoints_are_exact() {
    let a = rigid_transform();
    let b = affine_transform().translated(&Vector3::new(10.0, 0.0, 0.0));
    assert_eq!(a.interpolate_with(&b, 0.0), a);
    assert_eq!(a.interpolate_with(&b, 1.0), b);
    assert_eq!(a.spherical_interpolate_with(&b, 0.0), a);
    assert_eq!(a.spherical_interpolate_with(&b, 1.0), b);
}

#[test]
fn test_spherical_interpolation_keeps_rotation_rigid() {
    let a = rigid_transform();
    let b = Transform3D::IDENTITY.rotated(&Vector3::UP, 2.5);
    for step in 1..10 {
        let t = a.spherical_interpolate_with(&b, step as f32 / 10.0);
        assert!(t.basis.is_orthonormal(), "step {step}: {t}");
    }
}

#[test]
fn test_slerp_near_antipodal_inputs_stay_finite() {
    let q = Quaternion::from_axis_angle(&Vector3::UP, 0.8);
    let mid = q.slerp(&-q, 0.5);
    assert!(mid.is_finite());
    assert!(mid.is_normalized());

    let v = Vector3::new(1.0, 2.0, -0.5);
    assert!(v.slerp(&-v, 0.5).is_finite());
    assert!(v.slerp(&(v * 3.0), 0.5).is_finite());
    assert!(v.slerp(&Vector3::ZERO, 0.5).is_finite());

    let w = Vector2::new(1.0, 2.0);
    assert!(w.slerp(&Vector2::ZERO, 0.5).is_finite());
}

#[test]
fn test_truncated_remainder() {
    assert_eq!(Vector2::new(10.0, -20.0) % 7.0, Vector2::new(3.0, -6.0));
    assert_eq!(
        Vector2::new(10.0, -20.0) % Vector2::new(7.0, 8.0),
        Vector2::new(3.0, -4.0)
    );
}

#[test]
fn test_right_rotated_quarter_turn_is_down() {
    assert_abs_diff_eq!(Vector2::RIGHT.rotated(FRAC_PI_2), Vector2::DOWN, epsilon = 1e-6);
}

#[test]
fn test_look_at_negative_z_is_identity() {
    let t = Transform3D::IDENTITY.looking_at(&Vector3::new(0.0, 0.0, -1.0), &Vector3::UP);
    assert_abs_diff_eq!(t.basis, Basis::IDENTITY, epsilon = 1e-6);
    assert_abs_diff_eq!(t.basis.get_rotation_quaternion(), Quaternion::IDENTITY, epsilon = 1e-6);
}

#[test]
fn test_line_segment_pose_stretches_by_length_over_width() {
    let start = Vector3::ZERO;
    let end = Vector3::new(0.0, 0.0, -2.0);
    let width = 0.002;
    let length = start.distance_to(&end);

    let pose = Transform3D::IDENTITY
        .translated(&start)
        .looking_at(&end, &Vector3::UP)
        .translated_local(&(Vector3::FORWARD * (length / 2.0)))
        .rotated_local(&Vector3::RIGHT, -FRAC_PI_2)
        .scaled_local(&Vector3::new(1.0, length / width, 1.0));

    assert_relative_eq!(pose.basis.scale().y, 1000.0, max_relative = 1e-5);
    assert_abs_diff_eq!(pose.origin, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

    // the quad's stretched Y axis runs along the segment
    let half_extent = pose.basis * Vector3::new(0.0, width / 2.0, 0.0);
    assert_abs_diff_eq!(pose.origin + half_extent, end, epsilon = 1e-5);
    assert_abs_diff_eq!(pose.origin - half_extent, start, epsilon = 1e-5);
}
