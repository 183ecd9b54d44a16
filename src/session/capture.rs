//! Running capture pipelines.
//!
//! A [`CaptureSession`] drives an opened [`FrameSource`] from a
//! dedicated thread, publishing the most recent frame into a shared
//! slot that preview surfaces read from. The thread stops on an
//! explicit [`stop`](CaptureSession::stop) or when the session drops,
//! so a bound camera is always released with its last consumer.

use super::{CaptureError, Frame, FrameSource, ResolutionPreset, SessionConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

/// State shared between the session, its capture thread, and surfaces.
struct SessionShared {
    /// Most recent decoded frame; `None` until the first frame arrives.
    latest: Mutex<Option<Frame>>,
    /// Signal for the capture thread to exit.
    stop: AtomicBool,
    /// Cleared by the capture thread on exit.
    running: AtomicBool,
}

/// An active pipeline from an input device to a live frame stream.
///
/// Constructed once per bind. The capture thread reads frames as fast
/// as the source delivers them, paced to the configured frame rate.
pub struct CaptureSession {
    shared: Arc<SessionShared>,
    thread: Mutex<Option<JoinHandle<()>>>,
    preset: ResolutionPreset,
}

impl CaptureSession {
    /// Configures the source and starts the capture thread.
    ///
    /// Returns once the thread is spawned; frames arrive asynchronously
    /// from that point.
    pub fn start(
        mut source: Box<dyn FrameSource + Send>,
        config: &SessionConfig,
    ) -> Result<Self, CaptureError> {
        source.configure(config.preset)?;

        let shared = Arc::new(SessionShared {
            latest: Mutex::new(None),
            stop: AtomicBool::new(false),
            running: AtomicBool::new(true),
        });

        let interval = Duration::from_secs_f64(1.0 / f64::from(config.fps.max(1)));
        let thread_shared = Arc::clone(&shared);

        info!(preset = %config.preset, fps = config.fps, "Starting capture session");

        let handle = std::thread::Builder::new()
            .name("capture-loop".into())
            .spawn(move || {
                capture_loop(source, &thread_shared, interval);
                thread_shared.running.store(false, Ordering::SeqCst);
                debug!("Capture loop exited");
            })
            .map_err(|e| CaptureError::ReadFailed(format!("failed to spawn capture thread: {e}")))?;

        Ok(Self {
            shared,
            thread: Mutex::new(Some(handle)),
            preset: config.preset,
        })
    }

    /// Whether the capture thread is still producing frames.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Returns the most recent frame, or `None` before the first one.
    ///
    /// After a stop the slot keeps the final frame, so consumers keep a
    /// stable image rather than falling back to the placeholder.
    pub fn latest_frame(&self) -> Option<Frame> {
        self.shared
            .latest
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
    }

    /// Returns the capture resolution preset.
    pub fn preset(&self) -> ResolutionPreset {
        self.preset
    }

    /// Stops the capture thread and waits for it to exit. Idempotent.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        let handle = self.thread.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("Capture thread panicked during shutdown");
            }
            info!("Capture session stopped");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("preset", &self.preset)
            .field("running", &self.is_running())
            .finish()
    }
}

fn capture_loop(
    mut source: Box<dyn FrameSource + Send>,
    shared: &SessionShared,
    interval: Duration,
) {
    while !shared.stop.load(Ordering::SeqCst) {
        match source.read_frame() {
            Ok(frame) => {
                if !frame.is_valid() {
                    warn!(sequence = frame.sequence(), "Dropping malformed frame");
                } else if let Ok(mut slot) = shared.latest.lock() {
                    *slot = Some(frame);
                }
            }
            Err(e) if e.is_fatal() => {
                warn!("Capture loop terminating: {}", e);
                break;
            }
            Err(e) => {
                warn!("Frame read failed: {}", e);
            }
        }
        std::thread::sleep(interval);
    }
}
