//! Live video surface handles.

use super::{FillColor, SurfaceSize};
use crate::session::{CaptureSession, Frame};
use std::sync::Arc;

/// A drawable surface fed by a running capture session.
///
/// Handles are cheap to clone and share the underlying session; the
/// session stops when the last handle (and any other holder) releases
/// it. Before the first frame is decoded, consumers paint
/// [`fill_color`](VideoSurfaceHandle::fill_color).
#[derive(Debug, Clone)]
pub struct VideoSurfaceHandle {
    session: Arc<CaptureSession>,
    size: SurfaceSize,
    fill: FillColor,
    device_id: String,
}

impl VideoSurfaceHandle {
    /// Wraps a running session in a surface of the given size.
    pub(crate) fn new(session: CaptureSession, size: SurfaceSize, device_id: String) -> Self {
        Self {
            session: Arc::new(session),
            size,
            fill: FillColor::default(),
            device_id,
        }
    }

    /// Replaces the placeholder fill color.
    pub fn with_fill_color(mut self, fill: FillColor) -> Self {
        self.fill = fill;
        self
    }

    /// Target dimensions of the surface.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Color shown until the first frame arrives.
    pub fn fill_color(&self) -> FillColor {
        self.fill
    }

    /// Identifier of the device feeding this surface.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The most recent frame, or `None` before the first one.
    pub fn latest_frame(&self) -> Option<Frame> {
        self.session.latest_frame()
    }

    /// Whether the backing session is still producing frames.
    pub fn is_live(&self) -> bool {
        self.session.is_running()
    }

    /// Stops the backing session explicitly.
    ///
    /// Clones of this handle stay usable but frozen on the last frame.
    /// Dropping every clone has the same effect.
    pub fn stop(&self) {
        self.session.stop();
    }
}
