//! Session and preview configuration.
//!
//! The original demo steered behavior through process-wide constants
//! (which camera to prefer, whether the preview feeds a material or an
//! overlay). Here everything is explicit: a TOML file plus per-call
//! parameters, no globals.

use crate::surface::AttachMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed capture resolution presets.
///
/// Sessions run at a preset resolution regardless of the surface's
/// target size; scaling is the consumer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPreset {
    /// 320x240.
    Qvga,
    /// 640x480 (default, matches the original demo).
    #[default]
    Vga,
    /// 1280x720.
    Hd720,
}

impl ResolutionPreset {
    /// Returns (width, height) in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ResolutionPreset::Qvga => (320, 240),
            ResolutionPreset::Vga => (640, 480),
            ResolutionPreset::Hd720 => (1280, 720),
        }
    }
}

impl std::fmt::Display for ResolutionPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{}x{}", w, h)
    }
}

/// Configuration for a capture session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Capture resolution preset.
    pub preset: ResolutionPreset,
    /// Target frames per second.
    pub fps: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preset: ResolutionPreset::Vga,
            fps: 30,
        }
    }
}

impl SessionConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Preview binding preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Prefer the front-facing camera over the back-facing one.
    pub prefer_front: bool,
    /// How the consumer attaches the surface (overlay or material).
    pub attach: AttachMode,
    /// Preview surface width in pixels.
    pub surface_width: u32,
    /// Preview surface height in pixels.
    pub surface_height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            prefer_front: true,
            attach: AttachMode::Material,
            surface_width: 256,
            surface_height: 256,
        }
    }
}

impl PreviewConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid surface dimensions (must be positive)")]
    InvalidDimensions,
    #[error("invalid frame rate (must be 1-120 fps)")]
    InvalidFrameRate,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.session.validate()?;
        config.preview.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_valid() {
        assert!(SessionConfig::default().validate().is_ok());
        assert!(PreviewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_surface_dimensions_invalid() {
        let mut config = PreviewConfig::default();
        config.surface_width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_fps_bounds() {
        let mut config = SessionConfig::default();
        config.fps = 0;
        assert!(config.validate().is_err());
        config.fps = 121;
        assert!(config.validate().is_err());
        config.fps = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_config_roundtrip() {
        let text = r#"
            [session]
            preset = "qvga"
            fps = 15

            [preview]
            prefer_front = false
            attach = "overlay"
            surface_width = 128
            surface_height = 128
        "#;
        let config: FileConfig = toml::from_str(text).unwrap();
        assert_eq!(config.session.preset, ResolutionPreset::Qvga);
        assert_eq!(config.session.fps, 15);
        assert!(!config.preview.prefer_front);
        assert_eq!(config.preview.attach, AttachMode::Overlay);
    }
}
