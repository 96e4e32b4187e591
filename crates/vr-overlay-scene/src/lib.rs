//! vr-overlay-scene: places overlays in VR using the transform algebra
//!
//! This crate provides:
//! - C-layout interop structs for the VR runtime binding
//! - The `OverlayRuntime` trait and an in-memory implementation
//! - `LineOverlay`, a quad stretched between two tracked points
//! - Tracing subscriber initialisation from `LoggingConfig`

pub mod error;
pub mod interop;
pub mod line;
pub mod logging;
pub mod runtime;

pub use error::{OverlayError, Result};
pub use interop::{
    hmd_from_transform, hmd_from_vector2, hmd_from_vector3, transform_from_hmd, vector2_from_hmd,
    vector3_from_hmd, HmdMatrix34, HmdVector2, HmdVector3,
};
pub use line::LineOverlay;
pub use runtime::{OverlayHandle, OverlayRuntime, OverlayState, RecordingRuntime};
