//! 2D vector representation for screen-space and overlay-plane math
//!
//! Uses the screen convention where +Y points down, so `UP` is `(0, -1)`.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::axis::Axis2;
use crate::error::{MathError, Result};
use crate::macros::{fmt_tuple, impl_approx_eq, impl_componentwise_ops};
use crate::scalar;

/// A vector in 2D space
///
/// Ordering (`<`, `>`, ...) is lexicographic on `(x, y)`: it exists for
/// deterministic sorting, not as a comparison of magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// Both components set to one
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// Both components set to positive infinity
    pub const INF: Self = Self {
        x: f32::INFINITY,
        y: f32::INFINITY,
    };
    /// Unit vector pointing up (-Y)
    pub const UP: Self = Self { x: 0.0, y: -1.0 };
    /// Unit vector pointing down (+Y)
    pub const DOWN: Self = Self { x: 0.0, y: 1.0 };
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };
    /// Unit vector pointing left (-X)
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };

    /// Create a new 2D vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector rotated `angle` radians from +X.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Checked component read.
    pub fn get(&self, index: usize) -> Result<f32> {
        Axis2::try_from(index).map(|axis| self[axis])
    }

    /// Checked component write.
    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        let axis = Axis2::try_from(index)?;
        self[axis] = value;
        Ok(())
    }

    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Angle from +X in radians, in `[-π, π]`.
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Signed angle to `to`, in `(-π, π]`.
    pub fn angle_to(&self, to: &Vector2) -> f32 {
        self.cross(to).atan2(self.dot(to))
    }

    /// Angle of the line from this point to `to`.
    pub fn angle_to_point(&self, to: &Vector2) -> f32 {
        (*to - *self).angle()
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.x / self.y
    }

    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Rounds half away from zero.
    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    pub fn sign(&self) -> Self {
        Self::new(scalar::sign(self.x), scalar::sign(self.y))
    }

    /// Component-wise reciprocal.
    pub fn inverse(&self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y)
    }

    pub fn clamp(&self, min: &Vector2, max: &Vector2) -> Self {
        Self::new(
            scalar::clamp(self.x, min.x, max.x),
            scalar::clamp(self.y, min.y, max.y),
        )
    }

    /// Snaps each component to the nearest multiple of the matching `step` component.
    pub fn snapped(&self, step: &Vector2) -> Self {
        Self::new(
            scalar::snapped(self.x, step.x),
            scalar::snapped(self.y, step.y),
        )
    }

    /// Floored modulo by a scalar; unlike `%` the result takes the divisor's sign.
    pub fn posmod(&self, modulus: f32) -> Self {
        Self::new(
            scalar::posmod(self.x, modulus),
            scalar::posmod(self.y, modulus),
        )
    }

    /// Floored modulo by a vector of divisors.
    pub fn posmodv(&self, modulus: &Vector2) -> Self {
        Self::new(
            scalar::posmod(self.x, modulus.x),
            scalar::posmod(self.y, modulus.y),
        )
    }

    /// Scalar (z-component) cross product.
    pub fn cross(&self, other: &Vector2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: &Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared length; prefer this for comparisons.
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance_to(&self, to: &Vector2) -> f32 {
        (*to - *self).length()
    }

    pub fn distance_squared_to(&self, to: &Vector2) -> f32 {
        (*to - *self).length_squared()
    }

    /// Normalized direction from this point to `to`.
    pub fn direction_to(&self, to: &Vector2) -> Self {
        (*to - *self).normalized()
    }

    /// Unit-length copy, or `ZERO` if the squared length is exactly zero.
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// In-place [`normalized`](Self::normalized).
    pub fn normalize(&mut self) {
        let length_squared = self.length_squared();
        if length_squared == 0.0 {
            *self = Self::ZERO;
        } else {
            let length = length_squared.sqrt();
            self.x /= length;
            self.y /= length;
        }
    }

    pub fn is_normalized(&self) -> bool {
        (self.length_squared() - 1.0).abs() < scalar::EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Shortens the vector to `length` if it is longer.
    pub fn limit_length(&self, length: f32) -> Self {
        let l = self.length();
        let mut v = *self;
        if l > 0.0 && length < l {
            v /= l;
            v *= length;
        }
        v
    }

    /// Component-wise linear interpolation; `weight` is not clamped.
    pub fn lerp(&self, to: &Vector2, weight: f32) -> Self {
        Self::new(
            scalar::lerp(self.x, to.x, weight),
            scalar::lerp(self.y, to.y, weight),
        )
    }

    /// Spherical interpolation treating both operands as radius vectors.
    ///
    /// The length is interpolated linearly and the direction rotates by the
    /// angle between the vectors. Falls back to [`lerp`](Self::lerp) when
    /// either operand has zero length.
    pub fn slerp(&self, to: &Vector2, weight: f32) -> Self {
        let start_length_sq = self.length_squared();
        let end_length_sq = to.length_squared();
        if start_length_sq == 0.0 || end_length_sq == 0.0 {
            return self.lerp(to, weight);
        }
        let start_length = start_length_sq.sqrt();
        let result_length = scalar::lerp(start_length, end_length_sq.sqrt(), weight);
        let angle = self.angle_to(to);
        self.rotated(angle * weight) * (result_length / start_length)
    }

    pub fn cubic_interpolate(
        &self,
        b: &Vector2,
        pre_a: &Vector2,
        post_b: &Vector2,
        weight: f32,
    ) -> Self {
        Self::new(
            scalar::cubic_interpolate(self.x, b.x, pre_a.x, post_b.x, weight),
            scalar::cubic_interpolate(self.y, b.y, pre_a.y, post_b.y, weight),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cubic_interpolate_in_time(
        &self,
        b: &Vector2,
        pre_a: &Vector2,
        post_b: &Vector2,
        weight: f32,
        b_t: f32,
        pre_a_t: f32,
        post_b_t: f32,
    ) -> Self {
        Self::new(
            scalar::cubic_interpolate_in_time(
                self.x, b.x, pre_a.x, post_b.x, weight, b_t, pre_a_t, post_b_t,
            ),
            scalar::cubic_interpolate_in_time(
                self.y, b.y, pre_a.y, post_b.y, weight, b_t, pre_a_t, post_b_t,
            ),
        )
    }

    /// Cubic Bezier from `self` to `end`.
    pub fn bezier_interpolate(
        &self,
        control_1: &Vector2,
        control_2: &Vector2,
        end: &Vector2,
        t: f32,
    ) -> Self {
        Self::new(
            scalar::bezier_interpolate(self.x, control_1.x, control_2.x, end.x, t),
            scalar::bezier_interpolate(self.y, control_1.y, control_2.y, end.y, t),
        )
    }

    pub fn bezier_derivative(
        &self,
        control_1: &Vector2,
        control_2: &Vector2,
        end: &Vector2,
        t: f32,
    ) -> Self {
        Self::new(
            scalar::bezier_derivative(self.x, control_1.x, control_2.x, end.x, t),
            scalar::bezier_derivative(self.y, control_1.y, control_2.y, end.y, t),
        )
    }

    /// Steps toward `to` by at most `delta`, snapping exactly onto `to` when
    /// the remaining distance is within `delta` or below `EPSILON`.
    pub fn move_toward(&self, to: &Vector2, delta: f32) -> Self {
        let vd = *to - *self;
        let len = vd.length();
        if len <= delta || len < scalar::EPSILON {
            *to
        } else {
            *self + vd / len * delta
        }
    }

    /// Axis of the largest component; ties favour `X`.
    pub fn max_axis_index(&self) -> Axis2 {
        if self.x < self.y {
            Axis2::Y
        } else {
            Axis2::X
        }
    }

    /// Axis of the smallest component; ties favour `Y`.
    pub fn min_axis_index(&self) -> Axis2 {
        if self.x < self.y {
            Axis2::X
        } else {
            Axis2::Y
        }
    }

    /// Perpendicular vector, rotated 90 degrees counter-clockwise in screen space.
    pub fn orthogonal(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Rotates by `angle` radians.
    pub fn rotated(&self, angle: f32) -> Self {
        let (sine, cosine) = angle.sin_cos();
        Self::new(
            self.x * cosine - self.y * sine,
            self.x * sine + self.y * cosine,
        )
    }

    /// Projection onto `on_normal`, which need not be normalized.
    pub fn project(&self, on_normal: &Vector2) -> Self {
        *on_normal * (self.dot(on_normal) / on_normal.length_squared())
    }

    /// Reflection across the line perpendicular to `normal`.
    ///
    /// `normal` must be normalized. Debug builds panic otherwise; release
    /// builds return an unspecified result. See [`try_reflect`](Self::try_reflect).
    pub fn reflect(&self, normal: &Vector2) -> Self {
        debug_assert!(normal.is_normalized(), "argument `normal` is not normalized");
        *normal * (2.0 * self.dot(normal)) - *self
    }

    /// Negated [`reflect`](Self::reflect); same precondition.
    pub fn bounce(&self, normal: &Vector2) -> Self {
        -self.reflect(normal)
    }

    /// Component tangent to the line perpendicular to `normal`; same precondition.
    pub fn slide(&self, normal: &Vector2) -> Self {
        debug_assert!(normal.is_normalized(), "argument `normal` is not normalized");
        *self - *normal * self.dot(normal)
    }

    /// [`reflect`](Self::reflect) with the precondition always checked.
    pub fn try_reflect(&self, normal: &Vector2) -> Result<Self> {
        ensure_normalized(normal)?;
        Ok(*normal * (2.0 * self.dot(normal)) - *self)
    }

    pub fn try_bounce(&self, normal: &Vector2) -> Result<Self> {
        self.try_reflect(normal).map(|v| -v)
    }

    pub fn try_slide(&self, normal: &Vector2) -> Result<Self> {
        ensure_normalized(normal)?;
        Ok(*self - *normal * self.dot(normal))
    }

    pub fn is_equal_approx(&self, other: &Vector2) -> bool {
        scalar::is_equal_approx(self.x, other.x) && scalar::is_equal_approx(self.y, other.y)
    }

    pub fn is_zero_approx(&self) -> bool {
        scalar::is_zero_approx(self.x) && scalar::is_zero_approx(self.y)
    }
}

fn ensure_normalized(normal: &Vector2) -> Result<()> {
    if normal.is_normalized() {
        Ok(())
    } else {
        Err(MathError::NotNormalized { argument: "normal" })
    }
}

impl_componentwise_ops!(Vector2 { x, y });
impl_approx_eq!(Vector2 { x, y });

impl Index<Axis2> for Vector2 {
    type Output = f32;

    fn index(&self, axis: Axis2) -> &f32 {
        match axis {
            Axis2::X => &self.x,
            Axis2::Y => &self.y,
        }
    }
}

impl IndexMut<Axis2> for Vector2 {
    fn index_mut(&mut self, axis: Axis2) -> &mut f32 {
        match axis {
            Axis2::X => &mut self.x,
            Axis2::Y => &mut self.y,
        }
    }
}

/// Panics when `index > 1`; use [`Vector2::get`] for a checked read.
impl Index<usize> for Vector2 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match Axis2::try_from(index) {
            Ok(axis) => &self[axis],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match Axis2::try_from(index) {
            Ok(axis) => &mut self[axis],
            Err(e) => panic!("{e}"),
        }
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vector2> for [f32; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

/// `(x, y)`; a precision such as `{:.2}` applies to each component.
impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tuple(f, &[self.x, self.y])
    }
}
