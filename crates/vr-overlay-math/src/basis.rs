//! 3x3 linear map (rotation combined with possibly non-uniform scale)
//!
//! Stored column-major as three [`Vector3`] columns. Element `(row, column)`
//! is `basis[column][row]`.

use std::fmt;
use std::ops::{Index, IndexMut, Mul, MulAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::axis::Axis3;
use crate::error::{MathError, Result};
use crate::quaternion::Quaternion;
use crate::scalar;
use crate::vector3::Vector3;

/// A 3x3 matrix made of the X, Y and Z column vectors.
///
/// Columns need not be unit length nor perpendicular. Shear is not
/// supported by the decomposition helpers ([`scale`](Self::scale),
/// [`get_rotation_quaternion`](Self::get_rotation_quaternion)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    /// Column 0, the image of the X axis
    pub x: Vector3,
    /// Column 1, the image of the Y axis
    pub y: Vector3,
    /// Column 2, the image of the Z axis
    pub z: Vector3,
}

impl Basis {
    pub const IDENTITY: Self = Self::from_columns(Vector3::RIGHT, Vector3::UP, Vector3::BACK);
    /// Mirrors along X
    pub const FLIP_X: Self = Self::from_columns(Vector3::LEFT, Vector3::UP, Vector3::BACK);
    /// Mirrors along Y
    pub const FLIP_Y: Self = Self::from_columns(Vector3::RIGHT, Vector3::DOWN, Vector3::BACK);
    /// Mirrors along Z
    pub const FLIP_Z: Self = Self::from_columns(Vector3::RIGHT, Vector3::UP, Vector3::FORWARD);

    pub const fn from_columns(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self { x, y, z }
    }

    pub fn from_rows(row0: Vector3, row1: Vector3, row2: Vector3) -> Self {
        Self::from_columns(
            Vector3::new(row0.x, row1.x, row2.x),
            Vector3::new(row0.y, row1.y, row2.y),
            Vector3::new(row0.z, row1.z, row2.z),
        )
    }

    /// Rotation of `angle` radians around `axis`, which must be normalized.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        let axis_sq = Vector3::new(axis.x * axis.x, axis.y * axis.y, axis.z * axis.z);
        let (sine, cosine) = angle.sin_cos();
        let t = 1.0 - cosine;

        let xy = axis.x * axis.y * t;
        let xz = axis.x * axis.z * t;
        let yz = axis.y * axis.z * t;
        let xs = axis.x * sine;
        let ys = axis.y * sine;
        let zs = axis.z * sine;

        Self::from_rows(
            Vector3::new(axis_sq.x + cosine * (1.0 - axis_sq.x), xy - zs, xz + ys),
            Vector3::new(xy + zs, axis_sq.y + cosine * (1.0 - axis_sq.y), yz - xs),
            Vector3::new(xz - ys, yz + xs, axis_sq.z + cosine * (1.0 - axis_sq.z)),
        )
    }

    /// Diagonal scale matrix.
    pub fn from_scale(scale: &Vector3) -> Self {
        Self::from_columns(
            Vector3::new(scale.x, 0.0, 0.0),
            Vector3::new(0.0, scale.y, 0.0),
            Vector3::new(0.0, 0.0, scale.z),
        )
    }

    /// Rotation from Euler angles applied in YXZ order (yaw, then pitch, then roll).
    pub fn from_euler(euler: &Vector3) -> Self {
        let (sx, cx) = euler.x.sin_cos();
        let x_mat = Self::from_rows(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, cx, -sx),
            Vector3::new(0.0, sx, cx),
        );
        let (sy, cy) = euler.y.sin_cos();
        let y_mat = Self::from_rows(
            Vector3::new(cy, 0.0, sy),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-sy, 0.0, cy),
        );
        let (sz, cz) = euler.z.sin_cos();
        let z_mat = Self::from_rows(
            Vector3::new(cz, -sz, 0.0),
            Vector3::new(sz, cz, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        y_mat * x_mat * z_mat
    }

    /// Rotation matrix of a (normalized) quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let s = 2.0 / q.length_squared();
        let (xs, ys, zs) = (q.x * s, q.y * s, q.z * s);
        let (wx, wy, wz) = (q.w * xs, q.w * ys, q.w * zs);
        let (xx, xy, xz) = (q.x * xs, q.x * ys, q.x * zs);
        let (yy, yz, zz) = (q.y * ys, q.y * zs, q.z * zs);

        Self::from_rows(
            Vector3::new(1.0 - (yy + zz), xy - wz, xz + wy),
            Vector3::new(xy + wz, 1.0 - (xx + zz), yz - wx),
            Vector3::new(xz - wy, yz + wx, 1.0 - (xx + yy)),
        )
    }

    /// Rotation followed by a per-axis scale: `R(q) * S(scale)`.
    pub fn from_quaternion_scale(q: &Quaternion, scale: &Vector3) -> Self {
        Self::from_quaternion(q).scaled_local(scale)
    }

    /// Row `axis` of the matrix.
    pub fn row(&self, axis: Axis3) -> Vector3 {
        let i = axis.index();
        Vector3::new(self.x[i], self.y[i], self.z[i])
    }

    pub fn set_row(&mut self, axis: Axis3, value: Vector3) {
        let i = axis.index();
        self.x[i] = value.x;
        self.y[i] = value.y;
        self.z[i] = value.z;
    }

    pub fn column(&self, axis: Axis3) -> Vector3 {
        self[axis]
    }

    pub fn set_column(&mut self, axis: Axis3, value: Vector3) {
        self[axis] = value;
    }

    /// Checked row read.
    pub fn try_row(&self, index: usize) -> Result<Vector3> {
        Axis3::try_from(index)
            .map(|axis| self.row(axis))
            .map_err(|_| MathError::out_of_range("Basis row", index, 3))
    }

    /// Checked column read.
    pub fn try_column(&self, index: usize) -> Result<Vector3> {
        Axis3::try_from(index)
            .map(|axis| self[axis])
            .map_err(|_| MathError::out_of_range("Basis column", index, 3))
    }

    /// Checked element read at `[column, row]`.
    pub fn get(&self, column: usize, row: usize) -> Result<f32> {
        let column = self.try_column(column)?;
        column
            .get(row)
            .map_err(|_| MathError::out_of_range("Basis row", row, 3))
    }

    /// Checked element write at `[column, row]`.
    pub fn set(&mut self, column: usize, row: usize, value: f32) -> Result<()> {
        let axis = Axis3::try_from(column)
            .map_err(|_| MathError::out_of_range("Basis column", column, 3))?;
        self[axis]
            .set(row, value)
            .map_err(|_| MathError::out_of_range("Basis row", row, 3))
    }

    pub fn determinant(&self) -> f32 {
        self.x.dot(&self.y.cross(&self.z))
    }

    pub fn transposed(&self) -> Self {
        Self::from_rows(self.x, self.y, self.z)
    }

    /// General inverse via the adjugate.
    ///
    /// The determinant is not checked: a singular basis produces non-finite
    /// components. For pure rotations [`transposed`](Self::transposed) is
    /// equivalent and cheaper.
    pub fn inverse(&self) -> Self {
        let inv_det = 1.0 / self.determinant();
        Self::from_rows(
            self.y.cross(&self.z) * inv_det,
            self.z.cross(&self.x) * inv_det,
            self.x.cross(&self.y) * inv_det,
        )
    }

    /// Gram-Schmidt: unit, mutually perpendicular columns. X keeps its
    /// direction, Y is made perpendicular to X, Z to both.
    pub fn orthonormalized(&self) -> Self {
        let x = self.x.normalized();
        let y = (self.y - x * x.dot(&self.y)).normalized();
        let z = (self.z - x * x.dot(&self.z) - y * y.dot(&self.z)).normalized();
        Self::from_columns(x, y, z)
    }

    /// True when the columns are unit length and mutually perpendicular.
    pub fn is_orthonormal(&self) -> bool {
        self.x.is_normalized()
            && self.y.is_normalized()
            && self.z.is_normalized()
            && scalar::is_zero_approx(self.x.dot(&self.y))
            && scalar::is_zero_approx(self.x.dot(&self.z))
            && scalar::is_zero_approx(self.y.dot(&self.z))
    }

    /// Per-axis scale: column lengths, negated when the basis mirrors.
    pub fn scale(&self) -> Vector3 {
        self.scale_abs() * scalar::sign(self.determinant())
    }

    /// Column lengths.
    pub fn scale_abs(&self) -> Vector3 {
        Vector3::new(self.x.length(), self.y.length(), self.z.length())
    }

    /// Scale applied in the parent frame: `S(scale) * self`.
    pub fn scaled(&self, scale: &Vector3) -> Self {
        Self::from_columns(self.x * *scale, self.y * *scale, self.z * *scale)
    }

    /// Scale applied in the local frame: `self * S(scale)`.
    pub fn scaled_local(&self, scale: &Vector3) -> Self {
        Self::from_columns(self.x * scale.x, self.y * scale.y, self.z * scale.z)
    }

    /// Rotation applied in the parent frame: `R(axis, angle) * self`.
    pub fn rotated(&self, axis: &Vector3, angle: f32) -> Self {
        Self::from_axis_angle(axis, angle) * *self
    }

    /// Rotation applied in the local frame: `self * R(axis, angle)`.
    pub fn rotated_local(&self, axis: &Vector3, angle: f32) -> Self {
        *self * Self::from_axis_angle(axis, angle)
    }

    /// Rotational part as a quaternion, with any scale or mirroring removed.
    pub fn get_rotation_quaternion(&self) -> Quaternion {
        let mut orthonormalized = self.orthonormalized();
        if orthonormalized.determinant() < 0.0 {
            orthonormalized = orthonormalized.scaled(&-Vector3::ONE);
        }
        orthonormalized.get_quaternion()
    }

    /// Quaternion of a basis that is already a pure rotation.
    ///
    /// Branches on the trace and the largest diagonal element so the square
    /// root argument stays well away from zero near 180 degree rotations.
    pub fn get_quaternion(&self) -> Quaternion {
        let [r0, r1, r2] = self.rows();
        let trace = r0.x + r1.y + r2.z;

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            return Quaternion::new(
                (r2.y - r1.z) * inv_s,
                (r0.z - r2.x) * inv_s,
                (r1.x - r0.y) * inv_s,
                s * 0.25,
            );
        }

        if r0.x > r1.y && r0.x > r2.z {
            let s = (r0.x - r1.y - r2.z + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                s * 0.25,
                (r0.y + r1.x) * inv_s,
                (r0.z + r2.x) * inv_s,
                (r2.y - r1.z) * inv_s,
            )
        } else if r1.y > r2.z {
            let s = (-r0.x + r1.y - r2.z + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                (r0.y + r1.x) * inv_s,
                s * 0.25,
                (r1.z + r2.y) * inv_s,
                (r0.z - r2.x) * inv_s,
            )
        } else {
            let s = (-r0.x - r1.y + r2.z + 1.0).sqrt() * 2.0;
            let inv_s = 1.0 / s;
            Quaternion::new(
                (r0.z + r2.x) * inv_s,
                (r1.z + r2.y) * inv_s,
                s * 0.25,
                (r1.x - r0.y) * inv_s,
            )
        }
    }

    /// Euler angles in YXZ order, inverse of [`from_euler`](Self::from_euler).
    ///
    /// The basis must be a pure rotation.
    pub fn get_euler(&self) -> Vector3 {
        let [r0, r1, r2] = self.rows();
        let m12 = r1.z;

        if m12 < 1.0 - scalar::EPSILON {
            if m12 > -(1.0 - scalar::EPSILON) {
                // Pure X rotation: report it without spurious Y/Z angles
                if r1.x == 0.0 && r0.y == 0.0 && r0.z == 0.0 && r2.x == 0.0 && r0.x == 1.0 {
                    Vector3::new((-m12).atan2(r1.y), 0.0, 0.0)
                } else {
                    Vector3::new((-m12).asin(), r0.z.atan2(r2.z), r1.x.atan2(r1.y))
                }
            } else {
                Vector3::new(std::f32::consts::FRAC_PI_2, r0.y.atan2(r0.x), 0.0)
            }
        } else {
            Vector3::new(-std::f32::consts::FRAC_PI_2, -r0.y.atan2(r0.x), 0.0)
        }
    }

    /// Dot product of `with` against column X (row X of the transpose).
    pub fn tdotx(&self, with: &Vector3) -> f32 {
        self.x.dot(with)
    }

    pub fn tdoty(&self, with: &Vector3) -> f32 {
        self.y.dot(with)
    }

    pub fn tdotz(&self, with: &Vector3) -> f32 {
        self.z.dot(with)
    }

    /// Column-wise linear interpolation. Does not keep a rotation a rotation.
    pub fn lerp(&self, to: &Basis, weight: f32) -> Self {
        Self::from_columns(
            self.x.lerp(&to.x, weight),
            self.y.lerp(&to.y, weight),
            self.z.lerp(&to.z, weight),
        )
    }

    pub fn is_equal_approx(&self, other: &Basis) -> bool {
        self.x.is_equal_approx(&other.x)
            && self.y.is_equal_approx(&other.y)
            && self.z.is_equal_approx(&other.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn rows(&self) -> [Vector3; 3] {
        Axis3::ALL.map(|axis| self.row(axis))
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Quaternion> for Basis {
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(&q)
    }
}

/// Matrix product. The left operand is the outer (parent) map.
impl Mul for Basis {
    type Output = Basis;

    fn mul(self, rhs: Basis) -> Basis {
        Basis::from_columns(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

impl MulAssign for Basis {
    fn mul_assign(&mut self, rhs: Basis) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Basis {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}

/// Multiplies by the transpose; the inverse mapping only for orthonormal bases.
impl Mul<Basis> for Vector3 {
    type Output = Vector3;

    fn mul(self, basis: Basis) -> Vector3 {
        Vector3::new(basis.tdotx(&self), basis.tdoty(&self), basis.tdotz(&self))
    }
}

impl Index<Axis3> for Basis {
    type Output = Vector3;

    fn index(&self, axis: Axis3) -> &Vector3 {
        match axis {
            Axis3::X => &self.x,
            Axis3::Y => &self.y,
            Axis3::Z => &self.z,
        }
    }
}

impl IndexMut<Axis3> for Basis {
    fn index_mut(&mut self, axis: Axis3) -> &mut Vector3 {
        match axis {
            Axis3::X => &mut self.x,
            Axis3::Y => &mut self.y,
            Axis3::Z => &mut self.z,
        }
    }
}

/// Column access; panics when `index > 2`. See [`Basis::try_column`].
impl Index<usize> for Basis {
    type Output = Vector3;

    fn index(&self, index: usize) -> &Vector3 {
        match Axis3::try_from(index) {
            Ok(axis) => &self[axis],
            Err(_) => panic!("{}", MathError::out_of_range("Basis column", index, 3)),
        }
    }
}

impl IndexMut<usize> for Basis {
    fn index_mut(&mut self, index: usize) -> &mut Vector3 {
        match Axis3::try_from(index) {
            Ok(axis) => &mut self[axis],
            Err(_) => panic!("{}", MathError::out_of_range("Basis column", index, 3)),
        }
    }
}

impl AbsDiffEq for Basis {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Basis {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

/// `[X: (..), Y: (..), Z: (..)]` listing the columns.
impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[X: ")?;
        fmt::Display::fmt(&self.x, f)?;
        f.write_str(", Y: ")?;
        fmt::Display::fmt(&self.y, f)?;
        f.write_str(", Z: ")?;
        fmt::Display::fmt(&self.z, f)?;
        f.write_str("]")
    }
}
