//! Preview surfaces handed to the renderer.
//!
//! A surface is the crate's output: a drawable target fed by a running
//! capture session, consumed either as a compositable overlay or as a
//! texture source for a material slot.

mod handle;
mod types;

pub use handle::VideoSurfaceHandle;
pub use types::{AttachMode, FillColor, SurfaceSize};
