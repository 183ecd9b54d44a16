//! Facing-aware device binding.
//!
//! [`CameraBinder`] is the crate's entry point: it resolves a facing
//! preference to a concrete device, opens it, starts a capture session,
//! and hands back a live [`VideoSurfaceHandle`]. Each bind call is a
//! single-shot resolve-and-start; the binder keeps no state between
//! calls and enumerates devices fresh every time.

use crate::device::{DeviceDescriptor, DeviceRegistry, Facing, OpenError};
use crate::session::{CaptureError, CaptureSession, SessionConfig};
use crate::surface::{SurfaceSize, VideoSurfaceHandle};
use thiserror::Error;
use tracing::{info, warn};

/// Errors producing a preview surface.
///
/// Device absence and input-open failure are distinct here; the
/// original demo collapsed both into a silent empty result.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("no video device matches the requested facing")]
    NoMatchingDevice,
    #[error("failed to open input on the selected device: {0}")]
    InputOpenFailure(#[from] OpenError),
    #[error("failed to start capture session: {0}")]
    SessionStartFailure(#[from] CaptureError),
}

/// Resolves a facing preference to a running preview surface.
pub struct CameraBinder {
    registry: Box<dyn DeviceRegistry>,
    config: SessionConfig,
}

impl CameraBinder {
    /// Creates a binder over the given registry with default session settings.
    pub fn new(registry: Box<dyn DeviceRegistry>) -> Self {
        Self {
            registry,
            config: SessionConfig::default(),
        }
    }

    /// Overrides the session configuration (resolution preset, frame rate).
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds a live preview surface to a camera matching the preference.
    ///
    /// Enumerates video-capable devices and selects the last one in
    /// enumeration order whose facing matches (`Front` if `prefer_front`,
    /// `Back` otherwise). The last-match tie-break mirrors the behavior
    /// this crate replaces; use [`bind_device`](Self::bind_device) to
    /// select by identifier instead.
    ///
    /// On success the capture pipeline is already running; frames arrive
    /// asynchronously and the surface shows its fill color until the
    /// first one lands.
    pub fn bind_preview_surface(
        &self,
        prefer_front: bool,
        target_size: SurfaceSize,
    ) -> Result<VideoSurfaceHandle, BindError> {
        let wanted = if prefer_front {
            Facing::Front
        } else {
            Facing::Back
        };

        let devices = self.registry.enumerate();
        let selected = select_facing(&devices, wanted).ok_or_else(|| {
            warn!(facing = %wanted, candidates = devices.len(), "No matching video device");
            BindError::NoMatchingDevice
        })?;

        self.open_and_start(selected, target_size)
    }

    /// Binds a preview surface to a device chosen by identifier.
    ///
    /// Bypasses the facing scan entirely. An unknown or non-video
    /// identifier yields [`BindError::NoMatchingDevice`].
    pub fn bind_device(
        &self,
        device_id: &str,
        target_size: SurfaceSize,
    ) -> Result<VideoSurfaceHandle, BindError> {
        let devices = self.registry.enumerate();
        let selected = devices
            .iter()
            .find(|d| d.is_video() && d.id == device_id)
            .ok_or(BindError::NoMatchingDevice)?;

        self.open_and_start(selected, target_size)
    }

    fn open_and_start(
        &self,
        device: &DeviceDescriptor,
        target_size: SurfaceSize,
    ) -> Result<VideoSurfaceHandle, BindError> {
        info!(
            device = %device.id,
            label = %device.label,
            facing = %device.facing,
            "Selected capture device"
        );

        let source = self.registry.open(device)?;
        let session = CaptureSession::start(source, &self.config)?;

        info!(device = %device.id, size = %target_size, "Bound preview surface");
        Ok(VideoSurfaceHandle::new(
            session,
            target_size,
            device.id.clone(),
        ))
    }
}

impl std::fmt::Debug for CameraBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraBinder")
            .field("config", &self.config)
            .finish()
    }
}

/// Selects the last video device in enumeration order with the wanted facing.
fn select_facing(devices: &[DeviceDescriptor], wanted: Facing) -> Option<&DeviceDescriptor> {
    devices
        .iter()
        .filter(|d| d.is_video() && d.facing == wanted)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{MediaKind, MockRegistry};
    use proptest::prelude::*;

    fn size() -> SurfaceSize {
        SurfaceSize::new(256, 256).unwrap()
    }

    fn binder(registry: MockRegistry) -> CameraBinder {
        CameraBinder::new(Box::new(registry))
    }

    #[test]
    fn test_empty_enumeration_returns_no_match() {
        let result = binder(MockRegistry::new()).bind_preview_surface(false, size());
        assert!(matches!(result, Err(BindError::NoMatchingDevice)));
    }

    #[test]
    fn test_wrong_facing_returns_no_match() {
        let registry = MockRegistry::with_devices(vec![DeviceDescriptor::video(
            "back1",
            "Back Camera",
            Facing::Back,
        )]);
        let result = binder(registry).bind_preview_surface(true, size());
        assert!(matches!(result, Err(BindError::NoMatchingDevice)));
    }

    #[test]
    fn test_single_match_is_selected() {
        let registry = MockRegistry::with_devices(vec![
            DeviceDescriptor::video("back1", "Back Camera", Facing::Back),
            DeviceDescriptor::video("front1", "Front Camera", Facing::Front),
        ]);
        let handle = binder(registry).bind_preview_surface(true, size()).unwrap();
        assert_eq!(handle.device_id(), "front1");
        assert!(handle.is_live());
        handle.stop();
    }

    #[test]
    fn test_last_match_wins() {
        let registry = MockRegistry::with_devices(vec![
            DeviceDescriptor::video("front1", "Front Camera 1", Facing::Front),
            DeviceDescriptor::video("back1", "Back Camera", Facing::Back),
            DeviceDescriptor::video("front2", "Front Camera 2", Facing::Front),
        ]);
        let handle = binder(registry).bind_preview_surface(true, size()).unwrap();
        assert_eq!(handle.device_id(), "front2");
        handle.stop();
    }

    #[test]
    fn test_back_preference_selects_back() {
        let registry = MockRegistry::with_default_cameras();
        let handle = binder(registry)
            .bind_preview_surface(false, size())
            .unwrap();
        assert_eq!(handle.device_id(), "mock-back");
        handle.stop();
    }

    #[test]
    fn test_non_video_devices_are_ignored() {
        let registry = MockRegistry::with_devices(vec![DeviceDescriptor {
            id: "mic0".into(),
            label: "Front Microphone".into(),
            facing: Facing::Front,
            media: MediaKind::Audio,
        }]);
        let result = binder(registry).bind_preview_surface(true, size());
        assert!(matches!(result, Err(BindError::NoMatchingDevice)));
    }

    #[test]
    fn test_open_failure_surfaces_cause_and_starts_nothing() {
        let registry = MockRegistry::with_default_cameras()
            .fail_open("mock-front", OpenError::PermissionDenied);
        let opened = registry.open_counter();

        let result = binder(registry).bind_preview_surface(true, size());
        assert!(matches!(
            result,
            Err(BindError::InputOpenFailure(OpenError::PermissionDenied))
        ));
        assert_eq!(opened.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_target_size_propagates_to_surface() {
        let target = SurfaceSize::new(512, 128).unwrap();
        let handle = binder(MockRegistry::with_default_cameras())
            .bind_preview_surface(true, target)
            .unwrap();
        assert_eq!(handle.size(), target);
        handle.stop();
    }

    #[test]
    fn test_bind_device_bypasses_facing_scan() {
        let registry = MockRegistry::with_devices(vec![
            DeviceDescriptor::video("front1", "Front Camera 1", Facing::Front),
            DeviceDescriptor::video("front2", "Front Camera 2", Facing::Front),
        ]);
        let handle = binder(registry).bind_device("front1", size()).unwrap();
        assert_eq!(handle.device_id(), "front1");
        handle.stop();
    }

    #[test]
    fn test_bind_device_unknown_id() {
        let result = binder(MockRegistry::with_default_cameras()).bind_device("ghost", size());
        assert!(matches!(result, Err(BindError::NoMatchingDevice)));
    }

    #[test]
    fn test_concurrent_binds_are_independent() {
        let registry = MockRegistry::with_default_cameras();
        let opened = registry.open_counter();
        let binder = binder(registry);

        let front = binder.bind_preview_surface(true, size()).unwrap();
        let back = binder.bind_preview_surface(false, size()).unwrap();

        assert_eq!(opened.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert!(front.is_live());
        assert!(back.is_live());
        front.stop();
        assert!(back.is_live());
        back.stop();
    }

    fn facing_from(tag: u8) -> Facing {
        match tag % 3 {
            0 => Facing::Front,
            1 => Facing::Back,
            _ => Facing::Other,
        }
    }

    proptest! {
        #[test]
        fn selection_is_always_last_matching_video_device(
            entries in prop::collection::vec((any::<u8>(), any::<bool>()), 0..12),
            prefer_front in any::<bool>(),
        ) {
            let devices: Vec<DeviceDescriptor> = entries
                .iter()
                .enumerate()
                .map(|(i, (tag, video))| DeviceDescriptor {
                    id: format!("dev{i}"),
                    label: format!("Device {i}"),
                    facing: facing_from(*tag),
                    media: if *video { MediaKind::Video } else { MediaKind::Audio },
                })
                .collect();

            let wanted = if prefer_front { Facing::Front } else { Facing::Back };
            let expected = devices
                .iter()
                .rev()
                .find(|d| d.is_video() && d.facing == wanted)
                .map(|d| d.id.clone());

            let selected = select_facing(&devices, wanted).map(|d| d.id.clone());
            prop_assert_eq!(selected, expected);
        }
    }
}
