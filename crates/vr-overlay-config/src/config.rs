//! Overlay configuration file
//!
//! Every field has a default, so a partial (or empty) TOML file is valid:
//!
//! ```toml
//! [line]
//! width_in_meters = 0.005
//! strict_geometry = true
//!
//! [logging]
//! filter = "vr_overlay_scene=debug,info"
//!
//! [runtime]
//! tracking_origin = "seated"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vr_overlay_math::Vector3;

use crate::error::{ConfigError, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VR_OVERLAY_CONFIG";

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_LINE_WIDTH_IN_METERS: f32 = 0.002;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Geometry of line overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Width of the quad stretched along each segment
    #[serde(default = "default_width_in_meters")]
    pub width_in_meters: f32,
    /// World up used to orient the quad around the segment
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Reject zero-length segments and segments parallel to `up` instead of
    /// handing them to the math layer
    #[serde(default)]
    pub strict_geometry: bool,
}

fn default_width_in_meters() -> f32 {
    DEFAULT_LINE_WIDTH_IN_METERS
}

fn default_up() -> [f32; 3] {
    Vector3::UP.into()
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            width_in_meters: default_width_in_meters(),
            up: default_up(),
            strict_geometry: false,
        }
    }
}

impl LineConfig {
    pub fn up_vector(&self) -> Vector3 {
        Vector3::from(self.up)
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Colored output
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: default_ansi(),
        }
    }
}

/// VR runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub tracking_origin: TrackingOrigin,
}

/// Space that absolute overlay transforms are expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingOrigin {
    /// Relative to the calibrated seated position
    Seated,
    /// Relative to the calibrated standing area
    #[default]
    Standing,
    /// Raw tracker space
    RawAndUncalibrated,
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width_in_meters(mut self, width_in_meters: f32) -> Self {
        self.line.width_in_meters = width_in_meters;
        self
    }

    pub fn with_strict_geometry(mut self, strict: bool) -> Self {
        self.line.strict_geometry = strict;
        self
    }

    pub fn with_up(mut self, up: Vector3) -> Self {
        self.line.up = up.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = filter.into();
        self
    }

    pub fn with_tracking_origin(mut self, origin: TrackingOrigin) -> Self {
        self.runtime.tracking_origin = origin;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded overlay config from {}", path.display());
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved overlay config to {}", path.display());
        Ok(())
    }

    /// Platform config file location, e.g. `~/.config/vr-overlay/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vr-overlay").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Locate and load the active configuration.
    ///
    /// Lookup order:
    /// 1. the file named by `VR_OVERLAY_CONFIG`
    /// 2. `config.toml` in the platform config directory
    /// 3. built-in defaults
    ///
    /// A file that exists but fails to parse is an error, not a fallback.
    pub fn discover() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            tracing::debug!("Using config from ${}", CONFIG_ENV_VAR);
            return Self::load(PathBuf::from(path));
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            Some(path) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let width = self.line.width_in_meters;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "line.width_in_meters must be a positive finite number, got {width}"
            )));
        }

        let up = self.line.up_vector();
        if !up.is_finite() || up.is_zero_approx() {
            return Err(ConfigError::Invalid(format!(
                "line.up must be a non-zero finite vector, got {up}"
            )));
        }

        Ok(())
    }
}
