//! Typed axis indices.
//!
//! Indexing with an axis enum cannot go out of range; the `TryFrom<usize>`
//! conversions are the checked bridge from raw integers.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, Result};

/// Axis of a [`Vector2`](crate::Vector2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis2 {
    X = 0,
    Y = 1,
}

/// Axis of a [`Vector3`](crate::Vector3), or a column of a [`Basis`](crate::Basis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis2 {
    pub const ALL: [Axis2; 2] = [Axis2::X, Axis2::Y];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Axis3 {
    pub const ALL: [Axis3; 3] = [Axis3::X, Axis3::Y, Axis3::Z];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Axis2 {
    type Error = MathError;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Axis2::X),
            1 => Ok(Axis2::Y),
            _ => Err(MathError::out_of_range("Vector2 axis", index, 2)),
        }
    }
}

impl TryFrom<usize> for Axis3 {
    type Error = MathError;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Axis3::X),
            1 => Ok(Axis3::Y),
            2 => Ok(Axis3::Z),
            _ => Err(MathError::out_of_range("Vector3 axis", index, 3)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_try_from() {
        assert_eq!(Axis2::try_from(1), Ok(Axis2::Y));
        assert_eq!(Axis3::try_from(2), Ok(Axis3::Z));
        assert_eq!(
            Axis3::try_from(3),
            Err(MathError::IndexOutOfRange {
                kind: "Vector3 axis",
                index: 3,
                len: 3
            })
        );
        assert!(Axis2::try_from(2).is_err());
    }

    #[test]
    fn test_axis_index() {
        assert_eq!(Axis3::Z.index(), 2);
        assert_eq!(Axis2::ALL.map(Axis2::index), [0, 1]);
    }
}
