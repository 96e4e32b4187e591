//! Plain-old-data structs exchanged with the VR runtime binding
//!
//! Layouts match the runtime's C ABI. Conversions copy components in order
//! and never validate.

use vr_overlay_math::{Basis, Transform3D, Vector2, Vector3};

/// Two floats, `v0 = x`, `v1 = y`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HmdVector2 {
    pub v0: f32,
    pub v1: f32,
}

/// Three floats, `v0 = x`, `v1 = y`, `v2 = z`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HmdVector3 {
    pub v0: f32,
    pub v1: f32,
    pub v2: f32,
}

/// Row-major 3x4 matrix. Columns 0..3 hold the basis, column 3 the
/// translation.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HmdMatrix34 {
    pub m: [[f32; 4]; 3],
}

impl HmdMatrix34 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };
}

pub fn vector2_from_hmd(v: HmdVector2) -> Vector2 {
    Vector2::new(v.v0, v.v1)
}

pub fn hmd_from_vector2(v: Vector2) -> HmdVector2 {
    HmdVector2 { v0: v.x, v1: v.y }
}

pub fn vector3_from_hmd(v: HmdVector3) -> Vector3 {
    Vector3::new(v.v0, v.v1, v.v2)
}

pub fn hmd_from_vector3(v: Vector3) -> HmdVector3 {
    HmdVector3 {
        v0: v.x,
        v1: v.y,
        v2: v.z,
    }
}

/// `m[r][c] = basis[c][r]`, `m[r][3] = origin[r]`
pub fn hmd_from_transform(t: &Transform3D) -> HmdMatrix34 {
    let columns = [t.basis.x, t.basis.y, t.basis.z, t.origin];
    let mut m = [[0.0; 4]; 3];
    for (r, row) in m.iter_mut().enumerate() {
        for (c, value) in row.iter_mut().enumerate() {
            *value = columns[c][r];
        }
    }
    HmdMatrix34 { m }
}

pub fn transform_from_hmd(matrix: &HmdMatrix34) -> Transform3D {
    let column = |c: usize| Vector3::new(matrix.m[0][c], matrix.m[1][c], matrix.m[2][c]);
    Transform3D::new(
        Basis::from_columns(column(0), column(1), column(2)),
        column(3),
    )
}

impl From<HmdVector2> for Vector2 {
    fn from(v: HmdVector2) -> Self {
        vector2_from_hmd(v)
    }
}

impl From<Vector2> for HmdVector2 {
    fn from(v: Vector2) -> Self {
        hmd_from_vector2(v)
    }
}

impl From<HmdVector3> for Vector3 {
    fn from(v: HmdVector3) -> Self {
        vector3_from_hmd(v)
    }
}

impl From<Vector3> for HmdVector3 {
    fn from(v: Vector3) -> Self {
        hmd_from_vector3(v)
    }
}

impl From<&Transform3D> for HmdMatrix34 {
    fn from(t: &Transform3D) -> Self {
        hmd_from_transform(t)
    }
}

impl From<&HmdMatrix34> for Transform3D {
    fn from(matrix: &HmdMatrix34) -> Self {
        transform_from_hmd(matrix)
    }
}
