//! vr-overlay: transform algebra and overlay placement for VR scenes
//!
//! Re-exports the member crates:
//! - [`math`]: vectors, quaternions, bases and affine transforms
//! - [`config`]: TOML configuration
//! - [`scene`]: runtime interop and line overlays
//!
//! # Usage
//!
//! ```no_run
//! use vr_overlay::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = vr_overlay::bootstrap()?;
//!     let mut runtime = RecordingRuntime::new();
//!     let mut line = LineOverlay::from_config(
//!         "line.example",
//!         Vector3::ZERO,
//!         Vector3::new(0.0, 0.0, -2.0),
//!         &config.line,
//!     );
//!     line.sync(&mut runtime, &config)?;
//!     Ok(())
//! }
//! ```

use anyhow::Context;

pub use vr_overlay_config as config;
pub use vr_overlay_math as math;
pub use vr_overlay_scene as scene;

/// Commonly used types
pub mod prelude {
    pub use vr_overlay_config::{OverlayConfig, TrackingOrigin};
    pub use vr_overlay_math::{Axis2, Axis3, Basis, Quaternion, Transform3D, Vector2, Vector3};
    pub use vr_overlay_scene::{LineOverlay, OverlayRuntime, RecordingRuntime};
}

/// Discover the configuration and install logging from it.
pub fn bootstrap() -> anyhow::Result<config::OverlayConfig> {
    let config = config::OverlayConfig::discover().context("Failed to load overlay configuration")?;
    scene::logging::init(&config.logging).context("Failed to initialize logging")?;
    tracing::info!(
        "Overlay configuration ready (tracking origin {:?}, line width {} m)",
        config.runtime.tracking_origin,
        config.line.width_in_meters
    );
    Ok(config)
}
