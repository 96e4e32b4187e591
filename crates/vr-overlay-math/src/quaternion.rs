//! Quaternion representation for 3D rotations

use std::fmt;
use std::ops::{Index, IndexMut, Mul};

use serde::{Deserialize, Serialize};

use crate::basis::Basis;
use crate::error::{MathError, Result};
use crate::macros::{fmt_tuple, impl_approx_eq};
use crate::scalar;
use crate::vector3::Vector3;

/// A quaternion for representing 3D rotations
///
/// Rotation operations assume unit length; nothing enforces it at
/// construction. Use [`normalized`](Self::normalized) explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a new quaternion
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from axis-angle representation
    ///
    /// `axis` must be normalized.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        Self {
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
            w: cos_half,
        }
    }

    /// Shortest-arc rotation taking unit vector `from` onto unit vector `to`.
    ///
    /// Opposite vectors have no unique arc; a half turn around +Y is used.
    pub fn from_arc(from: &Vector3, to: &Vector3) -> Self {
        let c = from.cross(to);
        let d = from.dot(to);
        if d < -1.0 + scalar::EPSILON {
            Self::new(0.0, 1.0, 0.0, 0.0)
        } else {
            let s = ((1.0 + d) * 2.0).sqrt();
            let rs = 1.0 / s;
            Self::new(c.x * rs, c.y * rs, c.z * rs, s * 0.5)
        }
    }

    /// Rotation from YXZ Euler angles (see [`Basis::from_euler`]).
    pub fn from_euler(euler: &Vector3) -> Self {
        let half = *euler * 0.5;
        let (sin_a1, cos_a1) = half.y.sin_cos();
        let (sin_a2, cos_a2) = half.x.sin_cos();
        let (sin_a3, cos_a3) = half.z.sin_cos();

        Self::new(
            sin_a1 * cos_a2 * sin_a3 + cos_a1 * sin_a2 * cos_a3,
            sin_a1 * cos_a2 * cos_a3 - cos_a1 * sin_a2 * sin_a3,
            -sin_a1 * sin_a2 * cos_a3 + cos_a1 * cos_a2 * sin_a3,
            sin_a1 * sin_a2 * sin_a3 + cos_a1 * cos_a2 * cos_a3,
        )
    }

    /// Quaternion of a pure-rotation basis. Use
    /// [`Basis::get_rotation_quaternion`] when the basis may carry scale.
    pub fn from_basis(basis: &Basis) -> Self {
        basis.get_quaternion()
    }

    /// YXZ Euler angles of this rotation.
    pub fn get_euler(&self) -> Vector3 {
        Basis::from_quaternion(self).get_euler()
    }

    /// Checked component read (`x, y, z, w` = `0..4`).
    pub fn get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::out_of_range("Quaternion component", index, 4)),
        }
    }

    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(MathError::out_of_range("Quaternion component", index, 4)),
        }
        Ok(())
    }

    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Get the magnitude of the quaternion
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Unit-length copy. Unlike vectors there is no zero fallback: a zero
    /// quaternion yields NaN components.
    pub fn normalized(&self) -> Self {
        *self / self.length()
    }

    pub fn is_normalized(&self) -> bool {
        (self.length_squared() - 1.0).abs() < scalar::EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Inverse rotation of a unit quaternion (its conjugate).
    pub fn inverse(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotation axis. Near the identity the vector part is returned as is.
    pub fn get_axis(&self) -> Vector3 {
        if self.w.abs() > 1.0 - scalar::EPSILON {
            return Vector3::new(self.x, self.y, self.z);
        }
        let r = 1.0 / (1.0 - self.w * self.w).sqrt();
        Vector3::new(self.x * r, self.y * r, self.z * r)
    }

    /// Rotation angle in `[0, 2π]`.
    pub fn get_angle(&self) -> f32 {
        2.0 * scalar::clamp(self.w, -1.0, 1.0).acos()
    }

    /// Angle of the rotation taking `self` onto `to`.
    pub fn angle_to(&self, to: &Quaternion) -> f32 {
        let d = self.dot(to);
        scalar::clamp(d * d * 2.0 - 1.0, -1.0, 1.0).acos()
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        let u = Vector3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        *v + (uv * self.w + u.cross(&uv)) * 2.0
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// `to` is negated when that brings it closer, since `q` and `-q` are the
    /// same rotation. When the remaining angle is too small for a stable
    /// `sin` division the result is a renormalized linear blend.
    pub fn slerp(&self, to: &Quaternion, weight: f32) -> Self {
        let mut cos_omega = self.dot(to);
        let to = if cos_omega < 0.0 {
            cos_omega = -cos_omega;
            -*to
        } else {
            *to
        };

        if 1.0 - cos_omega > scalar::EPSILON {
            let omega = cos_omega.acos();
            let sin_omega = omega.sin();
            let scale0 = ((1.0 - weight) * omega).sin() / sin_omega;
            let scale1 = (weight * omega).sin() / sin_omega;
            *self * scale0 + to * scale1
        } else {
            (*self * (1.0 - weight) + to * weight).normalized()
        }
    }

    /// Like [`slerp`](Self::slerp) but without the shorter-arc sign flip.
    pub fn slerpni(&self, to: &Quaternion, weight: f32) -> Self {
        let dot = self.dot(to);
        if dot.abs() > 0.9999 {
            return *self;
        }
        let theta = dot.acos();
        let sin_t = 1.0 / theta.sin();
        let new_factor = (weight * theta).sin() * sin_t;
        let inv_factor = ((1.0 - weight) * theta).sin() * sin_t;
        *self * inv_factor + *to * new_factor
    }

    pub fn is_equal_approx(&self, other: &Quaternion) -> bool {
        scalar::is_equal_approx(self.x, other.x)
            && scalar::is_equal_approx(self.y, other.y)
            && scalar::is_equal_approx(self.z, other.z)
            && scalar::is_equal_approx(self.w, other.w)
    }

    /// Get the forward vector (-Z) under this rotation
    pub fn forward(&self) -> Vector3 {
        self.rotate_vector(&Vector3::FORWARD)
    }

    pub fn right(&self) -> Vector3 {
        self.rotate_vector(&Vector3::RIGHT)
    }

    pub fn up(&self) -> Vector3 {
        self.rotate_vector(&Vector3::UP)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Basis> for Quaternion {
    fn from(basis: Basis) -> Self {
        basis.get_rotation_quaternion()
    }
}

impl std::ops::Add for Quaternion {
    type Output = Quaternion;

    fn add(self, rhs: Self) -> Self::Output {
        Quaternion::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Quaternion;

    fn sub(self, rhs: Self) -> Self::Output {
        Quaternion::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self::Output {
        Quaternion::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: f32) -> Self::Output {
        Quaternion::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl std::ops::Div<f32> for Quaternion {
    type Output = Quaternion;

    fn div(self, rhs: f32) -> Self::Output {
        Quaternion::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(&rhs)
    }
}

impl_approx_eq!(Quaternion { x, y, z, w });

impl Index<usize> for Quaternion {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("{}", MathError::out_of_range("Quaternion component", index, 4)),
        }
    }
}

impl IndexMut<usize> for Quaternion {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("{}", MathError::out_of_range("Quaternion component", index, 4)),
        }
    }
}

/// `(x, y, z, w)`.
impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tuple(f, &[self.x, self.y, self.z, self.w])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identity() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Quaternion::IDENTITY * v, v);
    }

    #[test]
    fn test_90_degree_rotation() {
        // Rotate around Y axis by 90 degrees
        let q = Quaternion::from_axis_angle(&Vector3::UP, FRAC_PI_2);
        let rotated = q * Vector3::RIGHT;
        assert_abs_diff_eq!(rotated, Vector3::FORWARD, epsilon = 1e-6);
        assert_abs_diff_eq!(q.forward(), Vector3::LEFT, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_matches_basis() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalized();
        let q = Quaternion::from_axis_angle(&axis, 2.1);
        let b = Basis::from_axis_angle(&axis, 2.1);
        let v = Vector3::new(0.3, 0.7, -1.2);
        assert_abs_diff_eq!(q * v, b * v, epsilon = 1e-5);
        assert_abs_diff_eq!(Basis::from(q), b, epsilon = 1e-5);
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let n = q.normalized();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
        assert!(n.is_normalized());
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::from_axis_angle(&Vector3::UP, PI / 4.0);
        let result = q * q.inverse();
        assert_abs_diff_eq!(result, Quaternion::IDENTITY, epsilon = 1e-6);
    }

    #[test]
    fn test_axis_and_angle() {
        let q = Quaternion::from_axis_angle(&Vector3::BACK, 1.0);
        assert_relative_eq!(q.get_angle(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(q.get_axis(), Vector3::BACK, epsilon = 1e-5);
        assert_relative_eq!(
            Quaternion::IDENTITY.angle_to(&q),
            1.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_axis_of_identity_is_finite() {
        assert_eq!(Quaternion::IDENTITY.get_axis(), Vector3::ZERO);
        let tiny = Quaternion::from_axis_angle(&Vector3::UP, 1e-4);
        assert!(tiny.get_axis().is_finite());
        assert_eq!(Quaternion::IDENTITY.get_angle(), 0.0);
    }

    #[test]
    fn test_slerp_halfway() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(&Vector3::UP, FRAC_PI_2);
        let mid = a.slerp(&b, 0.5);
        let expected = Quaternion::from_axis_angle(&Vector3::UP, PI / 4.0);
        assert_abs_diff_eq!(mid, expected, epsilon = 1e-6);
        assert!(mid.is_normalized());
    }

    #[test]
    fn test_slerp_takes_shorter_arc() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_axis_angle(&Vector3::UP, FRAC_PI_2);
        let mid = a.slerp(&b, 0.5);
        let expected = Quaternion::from_axis_angle(&Vector3::UP, PI / 4.0);
        assert_abs_diff_eq!(mid, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_slerp_falls_back_for_nearly_equal_and_antipodal_inputs() {
        let a = Quaternion::from_axis_angle(&Vector3::RIGHT, 0.3);
        let nearly = Quaternion::from_axis_angle(&Vector3::RIGHT, 0.3 + 1e-5);
        let mid = a.slerp(&nearly, 0.5);
        assert!(mid.is_finite());
        assert!(mid.is_normalized());

        // -a is the same rotation as a
        let mid = a.slerp(&-a, 0.5);
        assert!(mid.is_finite());
        assert_abs_diff_eq!(mid, a, epsilon = 1e-6);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quaternion::from_axis_angle(&Vector3::RIGHT, 0.3);
        let b = Quaternion::from_axis_angle(&Vector3::UP, 1.3);
        assert_abs_diff_eq!(a.slerp(&b, 0.0), a, epsilon = 1e-6);
        assert_abs_diff_eq!(a.slerp(&b, 1.0), b, epsilon = 1e-6);
    }

    #[test]
    fn test_from_arc() {
        let q = Quaternion::from_arc(&Vector3::RIGHT, &Vector3::UP);
        assert_abs_diff_eq!(q * Vector3::RIGHT, Vector3::UP, epsilon = 1e-6);
        let flip = Quaternion::from_arc(&Vector3::RIGHT, &Vector3::LEFT);
        assert_abs_diff_eq!(flip * Vector3::RIGHT, Vector3::LEFT, epsilon = 1e-6);
    }

    #[test]
    fn test_euler_matches_basis() {
        let euler = Vector3::new(0.2, 0.9, -0.4);
        let q = Quaternion::from_euler(&euler);
        assert_abs_diff_eq!(Basis::from(q), Basis::from_euler(&euler), epsilon = 1e-5);
        assert_abs_diff_eq!(q.get_euler(), euler, epsilon = 1e-5);
    }

    #[test]
    fn test_hamilton_product_order() {
        let yaw = Quaternion::from_axis_angle(&Vector3::UP, FRAC_PI_2);
        let pitch = Quaternion::from_axis_angle(&Vector3::RIGHT, FRAC_PI_2);
        // pitch first, then yaw
        let v = (yaw * pitch) * Vector3::FORWARD;
        assert_abs_diff_eq!(v, Vector3::UP, epsilon = 1e-6);
        let b = Basis::from(yaw) * Basis::from(pitch);
        assert_abs_diff_eq!(Basis::from(yaw * pitch), b, epsilon = 1e-6);
    }

    #[test]
    fn test_checked_access() {
        let mut q = Quaternion::IDENTITY;
        assert_eq!(q.get(3), Ok(1.0));
        assert!(q.get(4).is_err());
        q.set(0, 0.5).unwrap();
        assert_eq!(q[0], 0.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Quaternion::IDENTITY.to_string(), "(0, 0, 0, 1)");
    }
}
