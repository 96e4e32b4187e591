//! Affine transform: a [`Basis`] plus a translation
//!
//! Operations come in pairs that differ only in the frame they act in.
//! The plain form (`rotated`, `scaled`, `translated`) applies the change in
//! the parent frame, i.e. left-multiplies. The `_local` form right-multiplies
//! and so acts along the transform's own axes.

use std::fmt;
use std::ops::{Index, IndexMut, Mul, MulAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::basis::Basis;
use crate::error::{MathError, Result};
use crate::vector3::Vector3;

/// A 3x4 matrix: three basis columns and the origin as column 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub basis: Basis,
    pub origin: Vector3,
}

impl Transform3D {
    /// No rotation, unit scale, at the origin
    pub const IDENTITY: Self = Self::new(Basis::IDENTITY, Vector3::ZERO);
    pub const FLIP_X: Self = Self::new(Basis::FLIP_X, Vector3::ZERO);
    pub const FLIP_Y: Self = Self::new(Basis::FLIP_Y, Vector3::ZERO);
    pub const FLIP_Z: Self = Self::new(Basis::FLIP_Z, Vector3::ZERO);

    pub const fn new(basis: Basis, origin: Vector3) -> Self {
        Self { basis, origin }
    }

    /// Build from the four columns of the 3x4 matrix.
    pub const fn from_columns(x: Vector3, y: Vector3, z: Vector3, origin: Vector3) -> Self {
        Self::new(Basis::from_columns(x, y, z), origin)
    }

    /// Pure translation.
    pub const fn from_origin(origin: Vector3) -> Self {
        Self::new(Basis::IDENTITY, origin)
    }

    /// Checked column read; column 3 is the origin.
    pub fn try_column(&self, index: usize) -> Result<Vector3> {
        match index {
            0 => Ok(self.basis.x),
            1 => Ok(self.basis.y),
            2 => Ok(self.basis.z),
            3 => Ok(self.origin),
            _ => Err(MathError::out_of_range("Transform3D column", index, 4)),
        }
    }

    /// Checked column write; column 3 is the origin.
    pub fn set_column(&mut self, index: usize, value: Vector3) -> Result<()> {
        let column = self.column_mut(index)?;
        *column = value;
        Ok(())
    }

    /// Checked element read at `[column, row]`.
    pub fn get(&self, column: usize, row: usize) -> Result<f32> {
        self.try_column(column)?
            .get(row)
            .map_err(|_| MathError::out_of_range("Transform3D row", row, 3))
    }

    /// Checked element write at `[column, row]`.
    pub fn set(&mut self, column: usize, row: usize, value: f32) -> Result<()> {
        self.column_mut(column)?
            .set(row, value)
            .map_err(|_| MathError::out_of_range("Transform3D row", row, 3))
    }

    fn column_mut(&mut self, index: usize) -> Result<&mut Vector3> {
        match index {
            0 => Ok(&mut self.basis.x),
            1 => Ok(&mut self.basis.y),
            2 => Ok(&mut self.basis.z),
            3 => Ok(&mut self.origin),
            _ => Err(MathError::out_of_range("Transform3D column", index, 4)),
        }
    }

    /// Inverse of a rotation + translation transform.
    ///
    /// Only correct when the basis is orthonormal; nothing checks this. Use
    /// [`affine_inverse`](Self::affine_inverse) when the basis carries scale.
    pub fn inverse(&self) -> Self {
        let basis = self.basis.transposed();
        Self::new(basis, basis * -self.origin)
    }

    /// Inverse of any non-singular transform. A singular basis yields
    /// non-finite components (see [`Basis::inverse`]).
    pub fn affine_inverse(&self) -> Self {
        let basis = self.basis.inverse();
        Self::new(basis, basis * -self.origin)
    }

    /// Same origin, basis rotated so -Z points at `target`.
    ///
    /// The columns are `z = normalize(origin - target)`,
    /// `x = normalize(up × z)`, `y = normalize(z × x)`. When `up` is parallel
    /// to the viewing direction, or `target` equals the origin, the basis
    /// collapses; the result is returned as is.
    pub fn looking_at(&self, target: &Vector3, up: &Vector3) -> Self {
        let mut t = *self;
        t.set_look_at(&self.origin, target, up);
        t
    }

    fn set_look_at(&mut self, eye: &Vector3, target: &Vector3, up: &Vector3) {
        let mut z = *eye - *target;
        z.normalize();
        let mut x = up.cross(&z);
        let mut y = z.cross(&x);
        x.normalize();
        y.normalize();

        self.basis = Basis::from_columns(x, y, z);
        self.origin = *eye;
    }

    /// Basis orthonormalized, origin kept.
    pub fn orthonormalized(&self) -> Self {
        Self::new(self.basis.orthonormalized(), self.origin)
    }

    /// Rotation around `axis` (normalized) in the parent frame. The origin
    /// rotates too.
    pub fn rotated(&self, axis: &Vector3, angle: f32) -> Self {
        Self::new(Basis::from_axis_angle(axis, angle), Vector3::ZERO) * *self
    }

    /// Rotation around the transform's own `axis`. The origin stays put.
    pub fn rotated_local(&self, axis: &Vector3, angle: f32) -> Self {
        Self::new(self.basis * Basis::from_axis_angle(axis, angle), self.origin)
    }

    /// Scale in the parent frame; the origin is scaled as well.
    pub fn scaled(&self, scale: &Vector3) -> Self {
        Self::new(self.basis.scaled(scale), self.origin * *scale)
    }

    /// Scale along the transform's own axes. The origin stays put.
    pub fn scaled_local(&self, scale: &Vector3) -> Self {
        Self::new(self.basis * Basis::from_scale(scale), self.origin)
    }

    /// Translation in the parent frame.
    pub fn translated(&self, offset: &Vector3) -> Self {
        Self::new(self.basis, self.origin + *offset)
    }

    /// Translation along the transform's own axes.
    pub fn translated_local(&self, offset: &Vector3) -> Self {
        Self::new(self.basis, self.origin + self.basis * *offset)
    }

    /// Column-wise linear blend of the basis plus a linear blend of the
    /// origin. Intermediate bases are generally not rotations; use
    /// [`spherical_interpolate_with`](Self::spherical_interpolate_with) for
    /// pose blending.
    pub fn interpolate_with(&self, other: &Transform3D, weight: f32) -> Self {
        Self::new(
            self.basis.lerp(&other.basis, weight),
            self.origin.lerp(&other.origin, weight),
        )
    }

    /// Pose blend: rotation by quaternion slerp, scale and origin linearly.
    ///
    /// Both bases are decomposed into rotation and per-axis scale, so shear
    /// is not supported. Weights of exactly `0` and `1` return the operands
    /// unchanged.
    pub fn spherical_interpolate_with(&self, other: &Transform3D, weight: f32) -> Self {
        if weight == 0.0 {
            return *self;
        }
        if weight == 1.0 {
            return *other;
        }

        let source_scale = self.basis.scale();
        let source_rotation = self.basis.get_rotation_quaternion();
        let destination_scale = other.basis.scale();
        let destination_rotation = other.basis.get_rotation_quaternion();

        let rotation = source_rotation
            .normalized()
            .slerp(&destination_rotation.normalized(), weight)
            .normalized();
        let scale = source_scale.lerp(&destination_scale, weight);

        Self::new(
            Basis::from_quaternion_scale(&rotation, &scale),
            self.origin.lerp(&other.origin, weight),
        )
    }

    /// Applies the transform to each point.
    pub fn xform_array(&self, points: &[Vector3]) -> Vec<Vector3> {
        points.iter().map(|p| *self * *p).collect()
    }

    /// Applies the inverse-direction mapping (`point * transform`) to each
    /// point. Exact only for orthonormal bases.
    pub fn xform_inv_array(&self, points: &[Vector3]) -> Vec<Vector3> {
        points.iter().map(|p| *p * *self).collect()
    }

    pub fn is_equal_approx(&self, other: &Transform3D) -> bool {
        self.basis.is_equal_approx(&other.basis) && self.origin.is_equal_approx(&other.origin)
    }

    pub fn is_finite(&self) -> bool {
        self.basis.is_finite() && self.origin.is_finite()
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Basis> for Transform3D {
    fn from(basis: Basis) -> Self {
        Self::new(basis, Vector3::ZERO)
    }
}

/// `parent * child`: the child expressed in the parent's frame.
impl Mul for Transform3D {
    type Output = Transform3D;

    fn mul(self, rhs: Transform3D) -> Transform3D {
        Transform3D::new(self.basis * rhs.basis, self * rhs.origin)
    }
}

impl MulAssign for Transform3D {
    fn mul_assign(&mut self, rhs: Transform3D) {
        *self = *self * rhs;
    }
}

/// Transforms a point: `basis * v + origin`.
impl Mul<Vector3> for Transform3D {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.basis * v + self.origin
    }
}

/// Inverse-direction mapping: subtracts the origin, then multiplies by the
/// transposed basis. Exact only for orthonormal bases.
impl Mul<Transform3D> for Vector3 {
    type Output = Vector3;

    fn mul(self, transform: Transform3D) -> Vector3 {
        (self - transform.origin) * transform.basis
    }
}

/// Column access, 3 being the origin. Panics when `index > 3`; see
/// [`Transform3D::try_column`].
impl Index<usize> for Transform3D {
    type Output = Vector3;

    fn index(&self, index: usize) -> &Vector3 {
        match index {
            0 => &self.basis.x,
            1 => &self.basis.y,
            2 => &self.basis.z,
            3 => &self.origin,
            _ => panic!("{}", MathError::out_of_range("Transform3D column", index, 4)),
        }
    }
}

impl IndexMut<usize> for Transform3D {
    fn index_mut(&mut self, index: usize) -> &mut Vector3 {
        match self.column_mut(index) {
            Ok(column) => column,
            Err(e) => panic!("{e}"),
        }
    }
}

impl AbsDiffEq for Transform3D {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.basis.abs_diff_eq(&other.basis, epsilon)
            && self.origin.abs_diff_eq(&other.origin, epsilon)
    }
}

impl RelativeEq for Transform3D {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.basis.relative_eq(&other.basis, epsilon, max_relative)
            && self.origin.relative_eq(&other.origin, epsilon, max_relative)
    }
}

/// `[X: (..), Y: (..), Z: (..), O: (..)]`.
impl fmt::Display for Transform3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[X: ")?;
        fmt::Display::fmt(&self.basis.x, f)?;
        f.write_str(", Y: ")?;
        fmt::Display::fmt(&self.basis.y, f)?;
        f.write_str(", Z: ")?;
        fmt::Display::fmt(&self.basis.z, f)?;
        f.write_str(", O: ")?;
        fmt::Display::fmt(&self.origin, f)?;
        f.write_str("]")
    }
}
