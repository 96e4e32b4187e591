//! vr-overlay-math: value-type algebra for placing overlays in VR space
//!
//! This crate provides:
//! - 2D and 3D vectors with geometric queries and interpolation
//! - Rotation quaternions with shortest-arc spherical interpolation
//! - 3x3 bases (rotation with non-uniform scale) and their decomposition
//! - 3x4 affine transforms with parent-frame and local-frame operations
//!
//! All types are `Copy` and every operation is a pure function of its
//! operands. Uses `f32` throughout and a right-handed coordinate system
//! with -Z as forward.
//!
//! # Usage
//!
//! ```
//! use vr_overlay_math::{Transform3D, Vector3};
//!
//! let start = Vector3::ZERO;
//! let end = Vector3::new(0.0, 0.0, -2.0);
//! let pose = Transform3D::IDENTITY
//!     .translated(&start)
//!     .looking_at(&end, &Vector3::UP)
//!     .translated_local(&(Vector3::FORWARD * 1.0));
//! assert!((pose.origin.z + 1.0).abs() < 1e-6);
//! ```

mod macros;

pub mod axis;
pub mod basis;
pub mod error;
pub mod quaternion;
pub mod scalar;
pub mod transform3d;
pub mod vector2;
pub mod vector3;

pub use axis::{Axis2, Axis3};
pub use basis::Basis;
pub use error::{MathError, Result};
pub use quaternion::Quaternion;
pub use transform3d::Transform3D;
pub use vector2::Vector2;
pub use vector3::Vector3;
