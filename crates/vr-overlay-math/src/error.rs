//! Error types for checked accessors and validated entry points.

/// Errors raised by the checked side of the algebra API.
///
/// Everything else in this crate is total: degenerate numeric input yields a
/// documented fallback value or propagates NaN/infinity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("index {index} is out of range for {kind} (valid: 0..{len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("argument `{argument}` is not normalized")]
    NotNormalized { argument: &'static str },
}

impl MathError {
    pub(crate) fn out_of_range(kind: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { kind, index, len }
    }
}

pub type Result<T> = std::result::Result<T, MathError>;
