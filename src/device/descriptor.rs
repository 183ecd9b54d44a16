//! Descriptions of physical capture devices.

use serde::{Deserialize, Serialize};

/// Physical orientation of a capture device relative to the device body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Faces the user (selfie camera).
    Front,
    /// Faces away from the user.
    Back,
    /// External or unknown orientation (webcams, capture cards).
    Other,
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
            Facing::Other => write!(f, "other"),
        }
    }
}

/// Kind of media a device produces.
///
/// Only `Video` devices are eligible for preview binding; the registry
/// may still report others (e.g. microphones on combined hardware).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Produces video frames.
    Video,
    /// Produces audio samples.
    Audio,
}

/// A physical capture device as reported by the platform registry.
///
/// Descriptors are enumerated fresh on every bind attempt and never
/// cached; the identifier is the only field stable across enumerations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Stable unique identifier within the registry.
    pub id: String,
    /// Human-readable device name.
    pub label: String,
    /// Physical facing.
    pub facing: Facing,
    /// Media produced by this device.
    pub media: MediaKind,
}

impl DeviceDescriptor {
    /// Creates a video device descriptor.
    pub fn video(id: impl Into<String>, label: impl Into<String>, facing: Facing) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            facing,
            media: MediaKind::Video,
        }
    }

    /// Whether this device can feed a preview surface.
    #[inline]
    pub fn is_video(&self) -> bool {
        self.media == MediaKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_constructor() {
        let dev = DeviceDescriptor::video("cam0", "Integrated Camera", Facing::Front);
        assert!(dev.is_video());
        assert_eq!(dev.facing, Facing::Front);
        assert_eq!(dev.id, "cam0");
    }

    #[test]
    fn test_facing_display() {
        assert_eq!(Facing::Front.to_string(), "front");
        assert_eq!(Facing::Back.to_string(), "back");
    }
}
