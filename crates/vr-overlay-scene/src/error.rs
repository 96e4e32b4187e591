use vr_overlay_config::ConfigError;
use vr_overlay_math::MathError;

use crate::runtime::OverlayHandle;

/// Error types for overlay placement and runtime calls.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Degenerate line segment {key}: {reason}")]
    DegenerateSegment { key: String, reason: &'static str },

    #[error("Unknown overlay handle: {0}")]
    UnknownHandle(OverlayHandle),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;
