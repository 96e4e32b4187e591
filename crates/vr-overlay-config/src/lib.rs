//! vr-overlay-config: TOML configuration for the overlay layer
//!
//! Loads `OverlayConfig` from an explicit path, from the file named by
//! `VR_OVERLAY_CONFIG`, or from the platform config directory, falling back
//! to built-in defaults.

pub mod config;
pub mod error;

pub use config::{
    LineConfig, LoggingConfig, OverlayConfig, RuntimeConfig, TrackingOrigin, CONFIG_ENV_VAR,
    CONFIG_FILE_NAME,
};
pub use error::{ConfigError, Result};
