//! Opened input connections that yield frames.
//!
//! A [`FrameSource`] is what a registry hands back after opening a
//! device: an exclusive connection to the device's frame stream. The
//! capture loop pulls from it; the test pattern implementation backs
//! tests and hardware-free demo runs.

use super::{Frame, ResolutionPreset};
use thiserror::Error;

/// Errors reading frames from an opened input.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to read frame: {0}")]
    ReadFailed(String),
    #[error("failed to decode frame: {0}")]
    DecodeFailed(String),
    #[error("input connection lost")]
    Disconnected,
}

impl CaptureError {
    /// Whether the capture loop should give up on this source.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CaptureError::Disconnected)
    }
}

/// Trait for opened input connections.
///
/// Implementations block in [`read_frame`](FrameSource::read_frame)
/// until the next frame is available. The connection is released when
/// the source is dropped.
pub trait FrameSource {
    /// Configures the source for the given preset, if it supports it.
    fn configure(&mut self, preset: ResolutionPreset) -> Result<(), CaptureError>;

    /// Blocks until the next frame is available and returns it.
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;
}

/// Synthetic frame source producing a moving gradient pattern.
///
/// Used by [`MockRegistry`](crate::device::MockRegistry) and as the
/// hardware-free mode of the demo binary. The pattern is deterministic
/// per sequence number so tests can assert on content.
#[derive(Debug)]
pub struct TestPatternSource {
    preset: ResolutionPreset,
    sequence: u64,
}

impl TestPatternSource {
    pub fn new() -> Self {
        Self {
            preset: ResolutionPreset::default(),
            sequence: 0,
        }
    }
}

impl Default for TestPatternSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for TestPatternSource {
    fn configure(&mut self, preset: ResolutionPreset) -> Result<(), CaptureError> {
        self.preset = preset;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        let (width, height) = self.preset.dimensions();
        let pixel_count = (width * height) as usize;

        // Horizontal gradient shifted by sequence so consecutive frames differ
        let mut pixels = Vec::with_capacity(pixel_count);
        for i in 0..pixel_count {
            let x = (i as u64 % width as u64) + self.sequence;
            pixels.push((x % 256) as u8);
        }

        self.sequence += 1;
        Ok(Frame::new(pixels, width, height, 1, self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_source_sequence() {
        let mut source = TestPatternSource::new();

        let frame = source.read_frame().unwrap();
        assert!(frame.is_valid());
        assert_eq!(frame.sequence(), 1);
        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);

        let frame2 = source.read_frame().unwrap();
        assert_eq!(frame2.sequence(), 2);
        assert_ne!(frame.pixels()[0], frame2.pixels()[0]);
    }

    #[test]
    fn test_pattern_source_respects_preset() {
        let mut source = TestPatternSource::new();
        source.configure(ResolutionPreset::Qvga).unwrap();

        let frame = source.read_frame().unwrap();
        assert_eq!(frame.width(), 320);
        assert_eq!(frame.height(), 240);
        assert!(frame.is_valid());
    }
}
