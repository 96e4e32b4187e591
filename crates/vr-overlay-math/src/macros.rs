//! Component-wise boilerplate shared by the vector-like types.

use std::fmt;

/// Writes one component, honouring the formatter precision if one was given.
pub(crate) fn fmt_scalar(f: &mut fmt::Formatter<'_>, value: f32) -> fmt::Result {
    match f.precision() {
        Some(precision) => write!(f, "{:.*}", precision, value),
        None => write!(f, "{}", value),
    }
}

/// Writes `(a, b, ...)`.
pub(crate) fn fmt_tuple(f: &mut fmt::Formatter<'_>, values: &[f32]) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt_scalar(f, *value)?;
    }
    f.write_str(")")
}

/// Arithmetic operators applied per component. `%` is the truncating
/// remainder of `f32`, so the result takes the sign of the dividend.
macro_rules! impl_componentwise_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl ::std::ops::Add for $ty {
            type Output = $ty;

            fn add(self, rhs: Self) -> Self::Output {
                $ty { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = $ty;

            fn sub(self, rhs: Self) -> Self::Output {
                $ty { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl ::std::ops::Mul for $ty {
            type Output = $ty;

            fn mul(self, rhs: Self) -> Self::Output {
                $ty { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl ::std::ops::Mul<f32> for $ty {
            type Output = $ty;

            fn mul(self, rhs: f32) -> Self::Output {
                $ty { $($field: self.$field * rhs),+ }
            }
        }

        impl ::std::ops::Mul<$ty> for f32 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                $ty { $($field: self * rhs.$field),+ }
            }
        }

        impl ::std::ops::Div for $ty {
            type Output = $ty;

            fn div(self, rhs: Self) -> Self::Output {
                $ty { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl ::std::ops::Div<f32> for $ty {
            type Output = $ty;

            fn div(self, rhs: f32) -> Self::Output {
                $ty { $($field: self.$field / rhs),+ }
            }
        }

        impl ::std::ops::Rem for $ty {
            type Output = $ty;

            fn rem(self, rhs: Self) -> Self::Output {
                $ty { $($field: self.$field % rhs.$field),+ }
            }
        }

        impl ::std::ops::Rem<f32> for $ty {
            type Output = $ty;

            fn rem(self, rhs: f32) -> Self::Output {
                $ty { $($field: self.$field % rhs),+ }
            }
        }

        impl ::std::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> Self::Output {
                $ty { $($field: -self.$field),+ }
            }
        }

        impl ::std::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl ::std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl ::std::ops::MulAssign<f32> for $ty {
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl ::std::ops::MulAssign for $ty {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl ::std::ops::DivAssign<f32> for $ty {
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }

        impl ::std::ops::DivAssign for $ty {
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }

        impl ::std::ops::RemAssign<f32> for $ty {
            fn rem_assign(&mut self, rhs: f32) {
                *self = *self % rhs;
            }
        }

        impl ::std::ops::RemAssign for $ty {
            fn rem_assign(&mut self, rhs: Self) {
                *self = *self % rhs;
            }
        }
    };
}

/// `approx` comparisons delegated to each component.
macro_rules! impl_approx_eq {
    ($ty:ident { $($field:ident),+ }) => {
        impl ::approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                <f32 as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                $(<f32 as ::approx::AbsDiffEq>::abs_diff_eq(&self.$field, &other.$field, epsilon))&&+
            }
        }

        impl ::approx::RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                <f32 as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                $(<f32 as ::approx::RelativeEq>::relative_eq(
                    &self.$field,
                    &other.$field,
                    epsilon,
                    max_relative,
                ))&&+
            }
        }
    };
}

pub(crate) use impl_approx_eq;
pub(crate) use impl_componentwise_ops;
