//! Capture sessions and frame delivery.
//!
//! A session owns an opened input connection and runs a capture loop on
//! a dedicated thread, publishing the most recent decoded frame for
//! consumers. Sessions stop when explicitly told to or when dropped.

mod capture;
mod config;
mod frame;
mod source;

pub use capture::CaptureSession;
pub use config::{ConfigError, FileConfig, PreviewConfig, ResolutionPreset, SessionConfig};
pub use frame::Frame;
pub use source::{CaptureError, FrameSource, TestPatternSource};
