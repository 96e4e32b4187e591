//! VR runtime binding trait
//!
//! The overlay layer only needs a handful of calls from the runtime. Real
//! bindings implement [`OverlayRuntime`]; [`RecordingRuntime`] keeps the
//! last state per overlay in memory and logs every call.

use std::collections::HashMap;
use std::fmt;

use vr_overlay_config::TrackingOrigin;

use crate::error::{OverlayError, Result};
use crate::interop::HmdMatrix34;

/// Opaque overlay handle issued by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Overlay calls of the VR runtime
pub trait OverlayRuntime {
    /// Create (or look up) the overlay registered under `key`
    fn create_overlay(&mut self, key: &str) -> Result<OverlayHandle>;

    /// Place the overlay with a transform relative to `origin`
    fn set_transform_absolute(
        &mut self,
        handle: OverlayHandle,
        origin: TrackingOrigin,
        transform: &HmdMatrix34,
    ) -> Result<()>;

    fn set_width_in_meters(&mut self, handle: OverlayHandle, width: f32) -> Result<()>;

    fn show(&mut self, handle: OverlayHandle) -> Result<()>;

    fn hide(&mut self, handle: OverlayHandle) -> Result<()>;
}

/// Last known state of one overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub key: String,
    pub origin: Option<TrackingOrigin>,
    pub transform: Option<HmdMatrix34>,
    pub width_in_meters: Option<f32>,
    pub visible: bool,
}

/// In-memory runtime for tests and headless use
#[derive(Debug, Default)]
pub struct RecordingRuntime {
    overlays: HashMap<OverlayHandle, OverlayState>,
    keys: HashMap<String, OverlayHandle>,
    next_handle: u64,
    calls: usize,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, handle: OverlayHandle) -> Option<&OverlayState> {
        self.overlays.get(&handle)
    }

    pub fn handle(&self, key: &str) -> Option<OverlayHandle> {
        self.keys.get(key).copied()
    }

    /// Total number of successful calls
    pub fn call_count(&self) -> usize {
        self.calls
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn state_mut(&mut self, handle: OverlayHandle) -> Result<&mut OverlayState> {
        let state = self
            .overlays
            .get_mut(&handle)
            .ok_or(OverlayError::UnknownHandle(handle))?;
        self.calls += 1;
        Ok(state)
    }
}

impl OverlayRuntime for RecordingRuntime {
    fn create_overlay(&mut self, key: &str) -> Result<OverlayHandle> {
        if let Some(handle) = self.handle(key) {
            return Ok(handle);
        }

        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        self.keys.insert(key.to_string(), handle);
        self.overlays.insert(
            handle,
            OverlayState {
                key: key.to_string(),
                origin: None,
                transform: None,
                width_in_meters: None,
                visible: false,
            },
        );
        self.calls += 1;
        tracing::debug!("Created overlay {} for key {}", handle, key);
        Ok(handle)
    }

    fn set_transform_absolute(
        &mut self,
        handle: OverlayHandle,
        origin: TrackingOrigin,
        transform: &HmdMatrix34,
    ) -> Result<()> {
        let state = self.state_mut(handle)?;
        state.origin = Some(origin);
        state.transform = Some(*transform);
        tracing::trace!("Overlay {} transform set ({:?})", handle, origin);
        Ok(())
    }

    fn set_width_in_meters(&mut self, handle: OverlayHandle, width: f32) -> Result<()> {
        if !(width.is_finite() && width > 0.0) {
            return Err(OverlayError::Runtime(format!(
                "invalid overlay width {width} for {handle}"
            )));
        }
        self.state_mut(handle)?.width_in_meters = Some(width);
        Ok(())
    }

    fn show(&mut self, handle: OverlayHandle) -> Result<()> {
        self.state_mut(handle)?.visible = true;
        Ok(())
    }

    fn hide(&mut self, handle: OverlayHandle) -> Result<()> {
        self.state_mut(handle)?.visible = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent_per_key() {
        let mut runtime = RecordingRuntime::new();
        let a = runtime.create_overlay("line.a").unwrap();
        let b = runtime.create_overlay("line.b").unwrap();
        assert_ne!(a, b);
        assert_eq!(runtime.create_overlay("line.a").unwrap(), a);
        assert_eq!(runtime.overlay_count(), 2);
        assert_eq!(runtime.state(a).unwrap().key, "line.a");
    }

    #[test]
    fn test_records_state() {
        let mut runtime = RecordingRuntime::new();
        let handle = runtime.create_overlay("quad").unwrap();

        runtime.set_width_in_meters(handle, 0.5).unwrap();
        runtime
            .set_transform_absolute(handle, TrackingOrigin::Seated, &HmdMatrix34::IDENTITY)
            .unwrap();
        runtime.show(handle).unwrap();

        let state = runtime.state(handle).unwrap();
        assert_eq!(state.width_in_meters, Some(0.5));
        assert_eq!(state.origin, Some(TrackingOrigin::Seated));
        assert_eq!(state.transform, Some(HmdMatrix34::IDENTITY));
        assert!(state.visible);
        assert_eq!(runtime.call_count(), 4);

        runtime.hide(handle).unwrap();
        assert!(!runtime.state(handle).unwrap().visible);
    }

    #[test]
    fn test_unknown_handle() {
        let mut runtime = RecordingRuntime::new();
        let err = runtime.show(OverlayHandle(42)).unwrap_err();
        assert!(matches!(err, OverlayError::UnknownHandle(OverlayHandle(42))));
        assert_eq!(err.to_string(), "Unknown overlay handle: #42");
    }

    #[test]
    fn test_rejects_invalid_width() {
        let mut runtime = RecordingRuntime::new();
        let handle = runtime.create_overlay("quad").unwrap();
        assert!(runtime.set_width_in_meters(handle, 0.0).is_err());
        assert!(runtime.set_width_in_meters(handle, f32::NAN).is_err());
        assert_eq!(runtime.state(handle).unwrap().width_in_meters, None);
    }
}
