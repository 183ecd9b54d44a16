//! Surface geometry and attachment types.

use crate::session::ConfigError;
use serde::{Deserialize, Serialize};

/// How the consumer attaches a preview surface to its scene.
///
/// The original demo chose this with a process-wide constant; it is an
/// explicit parameter here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachMode {
    /// Composite the surface over the rendered view.
    Overlay,
    /// Feed the surface into a mesh material's diffuse slot.
    #[default]
    Material,
}

impl std::fmt::Display for AttachMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachMode::Overlay => write!(f, "overlay"),
            AttachMode::Material => write!(f, "material"),
        }
    }
}

/// Validated pixel dimensions of a preview surface.
///
/// Construction rejects zero dimensions, so a `SurfaceSize` held by a
/// surface is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    width: u32,
    height: u32,
}

impl SurfaceSize {
    /// Creates a size, rejecting zero width or height.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Creates a square size.
    pub fn square(side: u32) -> Result<Self, ConfigError> {
        Self::new(side, side)
    }

    /// Surface width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl std::fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Solid color painted on a surface before the first frame arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillColor {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component.
    pub a: u8,
}

impl FillColor {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        // Orange, matching the original demo's pre-frame placeholder
        Self::rgb(255, 165, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(SurfaceSize::new(0, 256).is_err());
        assert!(SurfaceSize::new(256, 0).is_err());
        assert!(SurfaceSize::new(256, 256).is_ok());
    }

    #[test]
    fn test_square() {
        let size = SurfaceSize::square(256).unwrap();
        assert_eq!(size.width(), 256);
        assert_eq!(size.height(), 256);
    }

    #[test]
    fn test_default_fill_is_opaque() {
        assert_eq!(FillColor::default().a, 255);
    }
}
