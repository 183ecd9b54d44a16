//! Platform device registry abstraction.
//!
//! The registry is the crate's boundary to the platform media framework:
//! it lists available devices and opens input connections to them. A
//! mock implementation backs tests and the demo binary's default mode.

use super::{DeviceDescriptor, Facing};
use crate::session::{FrameSource, TestPatternSource};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors opening an input connection to a selected device.
#[derive(Debug, Clone, Error)]
pub enum OpenError {
    #[error("permission to access the device was denied")]
    PermissionDenied,
    #[error("device is busy (held by another session)")]
    Busy,
    #[error("hardware fault: {0}")]
    Hardware(String),
    #[error("device disappeared between enumeration and open: {0}")]
    NotFound(String),
}

/// Trait for device registries.
///
/// Implementations enumerate the devices currently visible to the
/// platform and open input connections to them. Enumeration is performed
/// fresh on each call; implementations must not cache results.
pub trait DeviceRegistry {
    /// Lists all devices currently exposed by the platform.
    fn enumerate(&self) -> Vec<DeviceDescriptor>;

    /// Opens an input connection to the given device.
    ///
    /// The returned source is an exclusive handle on the device's frame
    /// stream; it is released when dropped.
    fn open(&self, device: &DeviceDescriptor) -> Result<Box<dyn FrameSource + Send>, OpenError>;
}

/// In-memory registry for tests and hardware-free demo runs.
///
/// Holds a fixed device list and produces [`TestPatternSource`] streams
/// on open. Individual devices can be marked as failing to open.
#[derive(Debug, Default)]
pub struct MockRegistry {
    devices: Vec<DeviceDescriptor>,
    failing: HashSet<String>,
    fail_with: Option<OpenError>,
    opened: Arc<AtomicUsize>,
}

impl MockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the given devices.
    pub fn with_devices(devices: Vec<DeviceDescriptor>) -> Self {
        Self {
            devices,
            ..Self::default()
        }
    }

    /// Creates a registry with one front and one back camera.
    pub fn with_default_cameras() -> Self {
        Self::with_devices(vec![
            DeviceDescriptor::video("mock-back", "Mock Back Camera", Facing::Back),
            DeviceDescriptor::video("mock-front", "Mock Front Camera", Facing::Front),
        ])
    }

    /// Marks a device id as failing to open with the given error.
    pub fn fail_open(mut self, id: impl Into<String>, error: OpenError) -> Self {
        self.failing.insert(id.into());
        self.fail_with = Some(error);
        self
    }

    /// Number of input connections opened successfully so far.
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Shared counter handle, usable after the registry is moved into a binder.
    pub fn open_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.opened)
    }
}

impl DeviceRegistry for MockRegistry {
    fn enumerate(&self) -> Vec<DeviceDescriptor> {
        self.devices.clone()
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<Box<dyn FrameSource + Send>, OpenError> {
        if self.failing.contains(&device.id) {
            return Err(self
                .fail_with
                .clone()
                .unwrap_or(OpenError::Busy));
        }
        if !self.devices.iter().any(|d| d.id == device.id) {
            return Err(OpenError::NotFound(device.id.clone()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        tracing::info!(device = %device.id, "MockRegistry opened input");
        Ok(Box::new(TestPatternSource::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_returns_configured_devices() {
        let registry = MockRegistry::with_default_cameras();
        let devices = registry.enumerate();
        assert_eq!(devices.len(), 2);
        assert!(devices.iter().all(|d| d.is_video()));
    }

    #[test]
    fn test_open_unknown_device() {
        let registry = MockRegistry::new();
        let ghost = DeviceDescriptor::video("ghost", "Ghost", Facing::Front);
        assert!(matches!(registry.open(&ghost), Err(OpenError::NotFound(_))));
    }

    #[test]
    fn test_open_failure_injection() {
        let registry = MockRegistry::with_default_cameras()
            .fail_open("mock-front", OpenError::PermissionDenied);
        let front = registry
            .enumerate()
            .into_iter()
            .find(|d| d.id == "mock-front")
            .unwrap();
        assert!(matches!(
            registry.open(&front),
            Err(OpenError::PermissionDenied)
        ));
        assert_eq!(registry.open_count(), 0);
    }
}
