//! nokhwa-backed registry for real camera hardware.
//!
//! Enabled with the `camera` feature. Facing is inferred from the
//! device label, since most desktop backends do not report a physical
//! orientation; laptops and external webcams come out as `Other` and
//! are reachable through `bind_device`.

use super::{DeviceDescriptor, DeviceRegistry, Facing, MediaKind, OpenError};
use crate::session::{CaptureError, Frame, FrameSource, ResolutionPreset};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::Camera;
use tracing::{debug, warn};

/// Registry over the platform's native capture backend.
#[derive(Debug, Default)]
pub struct NativeRegistry;

impl NativeRegistry {
    pub fn new() -> Self {
        Self
    }
}

fn facing_from_label(label: &str) -> Facing {
    let label = label.to_ascii_lowercase();
    if label.contains("front") {
        Facing::Front
    } else if label.contains("back") || label.contains("rear") {
        Facing::Back
    } else {
        Facing::Other
    }
}

fn map_open_error(error: &nokhwa::NokhwaError) -> OpenError {
    let message = error.to_string();
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") {
        OpenError::PermissionDenied
    } else if lowered.contains("busy") || lowered.contains("in use") {
        OpenError::Busy
    } else {
        OpenError::Hardware(message)
    }
}

impl DeviceRegistry for NativeRegistry {
    fn enumerate(&self) -> Vec<DeviceDescriptor> {
        match nokhwa::query(ApiBackend::Auto) {
            Ok(cameras) => cameras
                .iter()
                .map(|info| {
                    let label = info.human_name();
                    DeviceDescriptor {
                        id: info.index().to_string(),
                        facing: facing_from_label(&label),
                        label,
                        media: MediaKind::Video,
                    }
                })
                .collect(),
            Err(e) => {
                warn!("Device enumeration failed: {}", e);
                Vec::new()
            }
        }
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<Box<dyn FrameSource + Send>, OpenError> {
        let index = match device.id.parse::<u32>() {
            Ok(n) => CameraIndex::Index(n),
            Err(_) => CameraIndex::String(device.id.clone()),
        };
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let camera = Camera::new(index, format).map_err(|e| map_open_error(&e))?;
        debug!(device = %device.id, "Opened native camera");
        Ok(Box::new(NativeSource {
            camera,
            streaming: false,
            sequence: 0,
        }))
    }
}

struct NativeSource {
    camera: Camera,
    streaming: bool,
    sequence: u64,
}

impl FrameSource for NativeSource {
    fn configure(&mut self, preset: ResolutionPreset) -> Result<(), CaptureError> {
        let (width, height) = preset.dimensions();
        self.camera
            .set_resolution(Resolution::new(width, height))
            .map_err(|e| CaptureError::ReadFailed(e.to_string()))
    }

    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        if !self.streaming {
            self.camera
                .open_stream()
                .map_err(|e| CaptureError::ReadFailed(e.to_string()))?;
            self.streaming = true;
        }

        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::ReadFailed(e.to_string()))?;
        let resolution = buffer.resolution();
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::DecodeFailed(e.to_string()))?;

        self.sequence += 1;
        Ok(Frame::new(
            decoded.into_raw(),
            resolution.width(),
            resolution.height(),
            3,
            self.sequence,
        ))
    }
}

impl Drop for NativeSource {
    fn drop(&mut self) {
        if self.streaming {
            if let Err(e) = self.camera.stop_stream() {
                warn!("Failed to stop camera stream: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_inference() {
        assert_eq!(facing_from_label("Front Camera"), Facing::Front);
        assert_eq!(facing_from_label("Rear Camera Module"), Facing::Back);
        assert_eq!(facing_from_label("Integrated Webcam"), Facing::Other);
    }
}
