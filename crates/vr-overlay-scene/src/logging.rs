//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use vr_overlay_config::LoggingConfig;

use crate::error::{OverlayError, Result};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` overrides the configured filter when it parses; a malformed
/// value is reported and ignored. Returns `Ok(false)` when the global
/// subscriber could not be installed, usually because one already exists.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, ignored) = select_filter(env_directives.as_deref(), &config.filter)?;

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .try_init()
    {
        Ok(()) => {
            if let Some(reason) = ignored {
                tracing::warn!("{reason}");
            }
            tracing::debug!("Logging initialized with filter {:?}", config.filter);
            Ok(true)
        }
        Err(e) => {
            tracing::debug!("Global subscriber not installed: {e}");
            Ok(false)
        }
    }
}

/// Pick the env directives over the configured ones. The second value
/// describes env directives that failed to parse.
fn select_filter(
    env_directives: Option<&str>,
    configured: &str,
) -> Result<(EnvFilter, Option<String>)> {
    let Some(directives) = env_directives else {
        return Ok((parse_filter(configured)?, None));
    };
    match EnvFilter::try_new(directives) {
        Ok(filter) => Ok((filter, None)),
        Err(e) => {
            let reason = format!(
                "Ignoring invalid {}={directives:?}: {e}",
                EnvFilter::DEFAULT_ENV
            );
            Ok((parse_filter(configured)?, Some(reason)))
        }
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| OverlayError::Logging(format!("invalid filter {directives:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("vr_overlay_scene=trace,warn").is_ok());
        assert!(matches!(
            parse_filter("vr_overlay_scene=loud"),
            Err(OverlayError::Logging(_))
        ));
    }

    #[test]
    fn test_env_directives_override_config() {
        let (_, ignored) = select_filter(Some("vr_overlay_scene=trace"), "info").unwrap();
        assert!(ignored.is_none());

        let (_, ignored) = select_filter(None, "warn").unwrap();
        assert!(ignored.is_none());
        assert!(select_filter(None, "vr_overlay_scene=loud").is_err());
    }

    #[test]
    fn test_malformed_env_directives_fall_back_to_config() {
        let (_, ignored) = select_filter(Some("vr_overlay_scene=loud"), "info").unwrap();
        let reason = ignored.unwrap();
        assert!(reason.contains("RUST_LOG"));
        assert!(reason.contains("vr_overlay_scene=loud"));

        // the fallback must itself be valid
        assert!(select_filter(Some("vr_overlay_scene=loud"), "also=loud").is_err());
    }

    #[test]
    fn test_init_twice() {
        let config = LoggingConfig::default();
        init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }
}
