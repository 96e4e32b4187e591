//! Line segment rendered as a stretched quad overlay
//!
//! The overlay quad is one `width_in_meters` wide and square. [`LineOverlay::pose`]
//! places its center on the segment's midpoint, turns its Y axis onto the
//! segment and stretches Y so the quad spans exactly `start..end`.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use vr_overlay_config::{LineConfig, OverlayConfig};
use vr_overlay_math::{scalar, Transform3D, Vector3};

use crate::error::{OverlayError, Result};
use crate::interop::hmd_from_transform;
use crate::runtime::{OverlayHandle, OverlayRuntime};

/// A line between two points in tracking space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOverlay {
    /// Runtime key the overlay is registered under
    pub key: String,
    pub start: Vector3,
    pub end: Vector3,
    pub width_in_meters: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(skip)]
    handle: Option<OverlayHandle>,
}

fn default_visible() -> bool {
    true
}

impl LineOverlay {
    pub fn new(key: impl Into<String>, start: Vector3, end: Vector3, width_in_meters: f32) -> Self {
        Self {
            key: key.into(),
            start,
            end,
            width_in_meters,
            visible: true,
            handle: None,
        }
    }

    /// New line using the configured default width
    pub fn from_config(
        key: impl Into<String>,
        start: Vector3,
        end: Vector3,
        config: &LineConfig,
    ) -> Self {
        Self::new(key, start, end, config.width_in_meters)
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn set_endpoints(&mut self, start: Vector3, end: Vector3) {
        self.start = start;
        self.end = end;
    }

    /// Handle assigned by the runtime on the first [`sync`](Self::sync)
    pub fn handle(&self) -> Option<OverlayHandle> {
        self.handle
    }

    pub fn length(&self) -> f32 {
        self.start.distance_to(&self.end)
    }

    /// Quad pose using +Y as up
    pub fn pose(&self) -> Transform3D {
        self.pose_with_up(&Vector3::UP)
    }

    /// Quad pose around the segment, facing as close to `up` as the segment
    /// allows.
    ///
    /// Zero-length segments and segments parallel to `up` produce a collapsed
    /// basis; see [`try_pose`](Self::try_pose).
    pub fn pose_with_up(&self, up: &Vector3) -> Transform3D {
        let length = self.length();
        Transform3D::IDENTITY
            .translated(&self.start)
            .looking_at(&self.end, up)
            .translated_local(&(Vector3::FORWARD * (length / 2.0)))
            .rotated_local(&Vector3::RIGHT, -FRAC_PI_2)
            .scaled_local(&Vector3::new(1.0, length / self.width_in_meters, 1.0))
    }

    /// Like [`pose_with_up`](Self::pose_with_up), but with `strict` set a
    /// degenerate segment is an error instead of a collapsed pose.
    pub fn try_pose(&self, up: &Vector3, strict: bool) -> Result<Transform3D> {
        if strict {
            if let Some(reason) = self.degeneracy(up) {
                return Err(OverlayError::DegenerateSegment {
                    key: self.key.clone(),
                    reason,
                });
            }
        }
        Ok(self.pose_with_up(up))
    }

    fn degeneracy(&self, up: &Vector3) -> Option<&'static str> {
        if scalar::is_zero_approx(self.length()) {
            return Some("start and end coincide");
        }
        let direction = self.start.direction_to(&self.end);
        if direction.cross(&up.normalized()).length_squared() < scalar::EPSILON {
            return Some("segment is parallel to the up vector");
        }
        None
    }

    /// Push width, pose and visibility to the runtime, registering the
    /// overlay on first use.
    pub fn sync<R: OverlayRuntime>(
        &mut self,
        runtime: &mut R,
        config: &OverlayConfig,
    ) -> Result<()> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => {
                let handle = runtime.create_overlay(&self.key)?;
                self.handle = Some(handle);
                handle
            }
        };

        if !self.visible {
            return runtime.hide(handle);
        }

        let up = config.line.up_vector();
        if let Some(reason) = self.degeneracy(&up) {
            tracing::warn!("Line {} is degenerate: {}", self.key, reason);
        }
        let pose = self.try_pose(&up, config.line.strict_geometry)?;

        runtime.set_width_in_meters(handle, self.width_in_meters)?;
        runtime.set_transform_absolute(
            handle,
            config.runtime.tracking_origin,
            &hmd_from_transform(&pose),
        )?;
        runtime.show(handle)?;

        tracing::debug!(
            "Synced line {} ({} -> {}, length {:.3})",
            self.key,
            self.start,
            self.end,
            self.length()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RecordingRuntime;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn base_line() -> LineOverlay {
        LineOverlay::new(
            "line.test",
            Vector3::ZERO,
            Vector3::new(0.0, 0.0, -2.0),
            0.002,
        )
    }

    #[test]
    fn test_length() {
        assert_eq!(base_line().length(), 2.0);
    }

    #[test]
    fn test_pose_centers_on_midpoint() {
        let line = LineOverlay::new(
            "diag",
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(3.0, 2.0, -1.0),
            0.01,
        );
        let pose = line.pose();
        assert_abs_diff_eq!(pose.origin, Vector3::new(2.0, 1.5, 0.0), epsilon = 1e-5);
        assert_relative_eq!(pose.basis.y.length(), line.length() / 0.01, max_relative = 1e-5);
        assert_relative_eq!(pose.basis.x.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_try_pose_lenient_allows_degenerate() {
        let line = LineOverlay::new("up", Vector3::ZERO, Vector3::UP, 0.01);
        let pose = line.try_pose(&Vector3::UP, false).unwrap();
        assert_eq!(pose.basis.x, Vector3::ZERO);
    }

    #[test]
    fn test_try_pose_strict_rejects_parallel_up() {
        let line = LineOverlay::new("up", Vector3::ZERO, Vector3::new(0.0, -3.0, 0.0), 0.01);
        let err = line.try_pose(&Vector3::UP, true).unwrap_err();
        assert!(matches!(
            err,
            OverlayError::DegenerateSegment {
                reason: "segment is parallel to the up vector",
                ..
            }
        ));
        // a different up makes it valid
        assert!(line.try_pose(&Vector3::BACK, true).is_ok());
    }

    #[test]
    fn test_try_pose_strict_rejects_zero_length() {
        let line = LineOverlay::new("dot", Vector3::ONE, Vector3::ONE, 0.01);
        let err = line.try_pose(&Vector3::UP, true).unwrap_err();
        assert!(err.to_string().contains("dot"));
    }

    #[test]
    fn test_sync_registers_once() {
        let mut runtime = RecordingRuntime::new();
        let config = OverlayConfig::default();
        let mut line = base_line();

        line.sync(&mut runtime, &config).unwrap();
        let handle = line.handle().unwrap();
        line.set_endpoints(Vector3::ZERO, Vector3::new(0.0, 0.0, -4.0));
        line.sync(&mut runtime, &config).unwrap();

        assert_eq!(line.handle(), Some(handle));
        assert_eq!(runtime.overlay_count(), 1);
        let state = runtime.state(handle).unwrap();
        assert!(state.visible);
        assert_eq!(state.width_in_meters, Some(0.002));
        // translation column holds the midpoint
        let m = state.transform.unwrap().m;
        assert_abs_diff_eq!(m[2][3], -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sync_hidden_line() {
        let mut runtime = RecordingRuntime::new();
        let mut line = base_line().with_visible(false);
        line.sync(&mut runtime, &OverlayConfig::default()).unwrap();

        let state = runtime.state(line.handle().unwrap()).unwrap();
        assert!(!state.visible);
        assert_eq!(state.transform, None);
    }

    #[test]
    fn test_sync_strict_geometry_stops_before_runtime_update() {
        let mut runtime = RecordingRuntime::new();
        let config = OverlayConfig::new().with_strict_geometry(true);
        let mut line = LineOverlay::new("vertical", Vector3::ZERO, Vector3::UP, 0.01);

        assert!(line.sync(&mut runtime, &config).is_err());
        let state = runtime.state(line.handle().unwrap()).unwrap();
        assert_eq!(state.transform, None);
        assert!(!state.visible);
    }

    #[test]
    fn test_from_config() {
        let config = OverlayConfig::new().with_width_in_meters(0.05);
        let line = LineOverlay::from_config("cfg", Vector3::ZERO, Vector3::RIGHT, &config.line);
        assert_eq!(line.width_in_meters, 0.05);
        assert!(line.visible);
    }
}
