//! 3D vector representation for points, directions and scale factors
//!
//! Right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Back (+) / Forward (-)

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::axis::Axis3;
use crate::basis::Basis;
use crate::error::{MathError, Result};
use crate::macros::{fmt_tuple, impl_approx_eq, impl_componentwise_ops};
use crate::scalar;

/// A vector in 3D space
///
/// Ordering (`<`, `>`, ...) is lexicographic on `(x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All components set to one
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// All components set to positive infinity
    pub const INF: Self = Self::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    /// Unit vector pointing up (+Y)
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector pointing down (-Y)
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector pointing left (-X)
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    /// Unit vector pointing forward (-Z)
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    /// Unit vector pointing backward (+Z)
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new 3D vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Checked component read.
    pub fn get(&self, index: usize) -> Result<f32> {
        Axis3::try_from(index).map(|axis| self[axis])
    }

    /// Checked component write.
    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        let axis = Axis3::try_from(index)?;
        self[axis] = value;
        Ok(())
    }

    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Rounds half away from zero.
    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round())
    }

    pub fn sign(&self) -> Self {
        Self::new(
            scalar::sign(self.x),
            scalar::sign(self.y),
            scalar::sign(self.z),
        )
    }

    /// Component-wise reciprocal.
    pub fn inverse(&self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    pub fn clamp(&self, min: &Vector3, max: &Vector3) -> Self {
        Self::new(
            scalar::clamp(self.x, min.x, max.x),
            scalar::clamp(self.y, min.y, max.y),
            scalar::clamp(self.z, min.z, max.z),
        )
    }

    pub fn snapped(&self, step: &Vector3) -> Self {
        Self::new(
            scalar::snapped(self.x, step.x),
            scalar::snapped(self.y, step.y),
            scalar::snapped(self.z, step.z),
        )
    }

    /// Floored modulo by a scalar; unlike `%` the result takes the divisor's sign.
    pub fn posmod(&self, modulus: f32) -> Self {
        Self::new(
            scalar::posmod(self.x, modulus),
            scalar::posmod(self.y, modulus),
            scalar::posmod(self.z, modulus),
        )
    }

    pub fn posmodv(&self, modulus: &Vector3) -> Self {
        Self::new(
            scalar::posmod(self.x, modulus.x),
            scalar::posmod(self.y, modulus.y),
            scalar::posmod(self.z, modulus.z),
        )
    }

    /// Calculate the dot product with another vector
    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the cross product with another vector
    pub fn cross(&self, other: &Vector3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Outer product `self * with^T`.
    pub fn outer(&self, with: &Vector3) -> Basis {
        Basis::from_rows(*with * self.x, *with * self.y, *with * self.z)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length (faster, avoids sqrt)
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn distance_to(&self, to: &Vector3) -> f32 {
        (*to - *self).length()
    }

    pub fn distance_squared_to(&self, to: &Vector3) -> f32 {
        (*to - *self).length_squared()
    }

    pub fn direction_to(&self, to: &Vector3) -> Self {
        (*to - *self).normalized()
    }

    /// Unit-length copy, or `ZERO` if the squared length is exactly zero.
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    pub fn normalize(&mut self) {
        let length_squared = self.length_squared();
        if length_squared == 0.0 {
            *self = Self::ZERO;
        } else {
            let length = length_squared.sqrt();
            self.x /= length;
            self.y /= length;
            self.z /= length;
        }
    }

    pub fn is_normalized(&self) -> bool {
        (self.length_squared() - 1.0).abs() < scalar::EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn limit_length(&self, length: f32) -> Self {
        let l = self.length();
        let mut v = *self;
        if l > 0.0 && length < l {
            v /= l;
            v *= length;
        }
        v
    }

    /// Unsigned angle to `to` in `[0, π]`.
    pub fn angle_to(&self, to: &Vector3) -> f32 {
        self.cross(to).length().atan2(self.dot(to))
    }

    /// Angle to `to`, negative when the rotation runs clockwise around `axis`.
    pub fn signed_angle_to(&self, to: &Vector3, axis: &Vector3) -> f32 {
        let cross = self.cross(to);
        let unsigned = cross.length().atan2(self.dot(to));
        if cross.dot(axis) < 0.0 {
            -unsigned
        } else {
            unsigned
        }
    }

    /// Rotates around `axis` (which must be normalized) by `angle` radians.
    pub fn rotated(&self, axis: &Vector3, angle: f32) -> Self {
        Basis::from_axis_angle(axis, angle) * *self
    }

    /// Component-wise linear interpolation; `weight` is not clamped.
    pub fn lerp(&self, to: &Vector3, weight: f32) -> Self {
        Self::new(
            scalar::lerp(self.x, to.x, weight),
            scalar::lerp(self.y, to.y, weight),
            scalar::lerp(self.z, to.z, weight),
        )
    }

    /// Spherical interpolation treating both operands as radius vectors.
    ///
    /// Falls back to [`lerp`](Self::lerp) when either operand has zero length
    /// or the two are (anti)parallel, where the rotation axis is undefined.
    pub fn slerp(&self, to: &Vector3, weight: f32) -> Self {
        let start_length_sq = self.length_squared();
        let end_length_sq = to.length_squared();
        if start_length_sq == 0.0 || end_length_sq == 0.0 {
            return self.lerp(to, weight);
        }
        let axis = self.cross(to);
        let axis_length_sq = axis.length_squared();
        // |a x b|^2 = |a|^2 |b|^2 sin^2(angle)
        if axis_length_sq <= start_length_sq * end_length_sq * scalar::EPSILON {
            return self.lerp(to, weight);
        }
        let axis = axis / axis_length_sq.sqrt();
        let start_length = start_length_sq.sqrt();
        let result_length = scalar::lerp(start_length, end_length_sq.sqrt(), weight);
        let angle = self.angle_to(to);
        self.rotated(&axis, angle * weight) * (result_length / start_length)
    }

    pub fn cubic_interpolate(
        &self,
        b: &Vector3,
        pre_a: &Vector3,
        post_b: &Vector3,
        weight: f32,
    ) -> Self {
        Self::new(
            scalar::cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            scalar::cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
            scalar::cubic_interpolate(self.z, b.z, pre_a.z, post_b.z, weight),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cubic_interpolate_in_time(
        &self,
        b: &Vector3,
        pre_a: &Vector3,
        post_b: &Vector3,
        weight: f32,
        b_t: f32,
        pre_a_t: f32,
        post_b_t: f32,
    ) -> Self {
        let component = |from: f32, to: f32, pre: f32, post: f32| {
            scalar::cubic_interpolate_in_time(from, to, pre, post, weight, b_t, pre_a_t, post_b_t)
        };
        Self::new(
            component(self.x, b.x, pre_a.x, post_b.x),
            component(self.y, b.y, pre_a.y, post_b.y),
            component(self.z, b.z, pre_a.z, post_b.z),
        )
    }

    pub fn bezier_interpolate(
        &self,
        control_1: &Vector3,
        control_2: &Vector3,
        end: &Vector3,
        t: f32,
    ) -> Self {
        Self::new(
            scalar::bezier_interpolate(self.x, control_1.x, control_2.x, end.x, t),
            scalar::bezier_interpolate(self.y, control_1.y, control_2.y, end.y, t),
            scalar::bezier_interpolate(self.z, control_1.z, control_2.z, end.z, t),
        )
    }

    pub fn bezier_derivative(
        &self,
        control_1: &Vector3,
        control_2: &Vector3,
        end: &Vector3,
        t: f32,
    ) -> Self {
        Self::new(
            scalar::bezier_derivative(self.x, control_1.x, control_2.x, end.x, t),
            scalar::bezier_derivative(self.y, control_1.y, control_2.y, end.y, t),
            scalar::bezier_derivative(self.z, control_1.z, control_2.z, end.z, t),
        )
    }

    /// Steps toward `to` by at most `delta` without overshooting.
    pub fn move_toward(&self, to: &Vector3, delta: f32) -> Self {
        let vd = *to - *self;
        let len = vd.length();
        if len <= delta || len < scalar::EPSILON {
            *to
        } else {
            *self + vd / len * delta
        }
    }

    /// Axis of the largest component; ties favour the lower axis.
    pub fn max_axis_index(&self) -> Axis3 {
        if self.x < self.y {
            if self.y < self.z {
                Axis3::Z
            } else {
                Axis3::Y
            }
        } else if self.x < self.z {
            Axis3::Z
        } else {
            Axis3::X
        }
    }

    /// Axis of the smallest component; ties favour the higher axis.
    pub fn min_axis_index(&self) -> Axis3 {
        if self.x < self.y {
            if self.x < self.z {
                Axis3::X
            } else {
                Axis3::Z
            }
        } else if self.y < self.z {
            Axis3::Y
        } else {
            Axis3::Z
        }
    }

    /// Projection onto `on_normal`, which need not be normalized.
    pub fn project(&self, on_normal: &Vector3) -> Self {
        *on_normal * (self.dot(on_normal) / on_normal.length_squared())
    }

    /// Reflection across the plane with the given `normal`.
    ///
    /// `normal` must be normalized. Debug builds panic otherwise; release
    /// builds return an unspecified result. See [`try_reflect`](Self::try_reflect).
    pub fn reflect(&self, normal: &Vector3) -> Self {
        debug_assert!(normal.is_normalized(), "argument `normal` is not normalized");
        *normal * (2.0 * self.dot(normal)) - *self
    }

    pub fn bounce(&self, normal: &Vector3) -> Self {
        -self.reflect(normal)
    }

    /// Component of the vector lying in the plane with the given `normal`.
    pub fn slide(&self, normal: &Vector3) -> Self {
        debug_assert!(normal.is_normalized(), "argument `normal` is not normalized");
        *self - *normal * self.dot(normal)
    }

    /// [`reflect`](Self::reflect) with the precondition always checked.
    pub fn try_reflect(&self, normal: &Vector3) -> Result<Self> {
        ensure_normalized(normal)?;
        Ok(*normal * (2.0 * self.dot(normal)) - *self)
    }

    pub fn try_bounce(&self, normal: &Vector3) -> Result<Self> {
        self.try_reflect(normal).map(|v| -v)
    }

    pub fn try_slide(&self, normal: &Vector3) -> Result<Self> {
        ensure_normalized(normal)?;
        Ok(*self - *normal * self.dot(normal))
    }

    pub fn is_equal_approx(&self, other: &Vector3) -> bool {
        scalar::is_equal_approx(self.x, other.x)
            && scalar::is_equal_approx(self.y, other.y)
            && scalar::is_equal_approx(self.z, other.z)
    }

    pub fn is_zero_approx(&self) -> bool {
        scalar::is_zero_approx(self.x)
            && scalar::is_zero_approx(self.y)
            && scalar::is_zero_approx(self.z)
    }
}

fn ensure_normalized(normal: &Vector3) -> Result<()> {
    if normal.is_normalized() {
        Ok(())
    } else {
        Err(MathError::NotNormalized { argument: "normal" })
    }
}

impl_componentwise_ops!(Vector3 { x, y, z });
impl_approx_eq!(Vector3 { x, y, z });

impl Index<Axis3> for Vector3 {
    type Output = f32;

    fn index(&self, axis: Axis3) -> &f32 {
        match axis {
            Axis3::X => &self.x,
            Axis3::Y => &self.y,
            Axis3::Z => &self.z,
        }
    }
}

impl IndexMut<Axis3> for Vector3 {
    fn index_mut(&mut self, axis: Axis3) -> &mut f32 {
        match axis {
            Axis3::X => &mut self.x,
            Axis3::Y => &mut self.y,
            Axis3::Z => &mut self.z,
        }
    }
}

/// Panics when `index > 2`; use [`Vector3::get`] for a checked read.
impl Index<usize> for Vector3 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match Axis3::try_from(index) {
            Ok(axis) => &self[axis],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match Axis3::try_from(index) {
            Ok(axis) => &mut self[axis],
            Err(e) => panic!("{e}"),
        }
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// `(x, y, z)`; a precision such as `{:.3}` applies to each component.
impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tuple(f, &[self.x, self.y, self.z])
    }
}
