//! Camera Preview Binding Library
//!
//! Resolves a camera facing preference to a concrete capture device and
//! produces a live video surface suitable for use as a render overlay
//! or a mesh texture source.
//!
//! # Architecture
//!
//! The crate follows a single resolve-and-start flow:
//!
//! ```text
//! device (enumerate + open) → session (capture loop) → surface (handle)
//!                    ↑
//!                 binder (selection + wiring)
//! ```
//!
//! # Design Principles
//!
//! - **Explicit parameters**: facing preference, surface size, and
//!   attach mode are passed per call, never read from globals
//! - **Tagged failures**: a missing device and a failed open are
//!   distinct errors, not a collapsed empty result
//! - **Scoped capture**: a session stops when its last surface handle
//!   is released, never outliving its consumer
//!
//! # Example
//!
//! ```no_run
//! use camera_preview::{
//!     binder::CameraBinder,
//!     device::MockRegistry,
//!     surface::SurfaceSize,
//! };
//!
//! let binder = CameraBinder::new(Box::new(MockRegistry::with_default_cameras()));
//! let size = SurfaceSize::new(256, 256).unwrap();
//!
//! let surface = binder.bind_preview_surface(true, size).unwrap();
//!
//! // The session is live; the renderer polls for frames and paints
//! // the fill color until the first one arrives.
//! match surface.latest_frame() {
//!     Some(frame) => println!("frame {}x{}", frame.width(), frame.height()),
//!     None => println!("placeholder fill"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod binder;
pub mod device;
pub mod session;
pub mod surface;

// Re-export commonly used types at crate root
pub use binder::{BindError, CameraBinder};
pub use device::{DeviceDescriptor, DeviceRegistry, Facing, MediaKind, MockRegistry, OpenError};
pub use session::{
    CaptureError, CaptureSession, ConfigError, FileConfig, Frame, FrameSource, PreviewConfig,
    ResolutionPreset, SessionConfig, TestPatternSource,
};
pub use surface::{AttachMode, FillColor, SurfaceSize, VideoSurfaceHandle};

#[cfg(feature = "camera")]
pub use device::NativeRegistry;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
