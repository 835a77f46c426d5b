//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConvertProgress>`] via
//! [`crate::config::PipelineConfigBuilder::progress_callback`] to receive
//! checkpoint events as the pipeline decodes, composes, and encodes.
//!
//! # Why callbacks instead of channels?
//!
//! The callback is the least-invasive integration point: callers can forward
//! events to a progress bar, a UI message bus, or a log without the library
//! knowing how the host application communicates. The trait is `Send + Sync`
//! and all payloads are owned values, so events can be produced from blocking
//! worker threads and forwarded across task boundaries.
//!
//! # Checkpoints
//!
//! `on_progress` fires at fixed points: 20 (decoding), 50 (preparing the
//! surface), 80 (encoding), 100 (complete). The percentage is a display
//! value, not a measurement — the stages are too short to meter honestly.

use std::sync::Arc;

/// Called by the conversion pipeline as it passes each checkpoint.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConvertProgress: Send + Sync {
    /// Called at each progress checkpoint.
    ///
    /// # Arguments
    /// * `percent` — 0–100 display percentage
    /// * `status`  — short human-readable stage description
    fn on_progress(&self, percent: u8, status: String) {
        let _ = (percent, status);
    }

    /// Called once when a conversion produces output.
    ///
    /// # Arguments
    /// * `output_bytes` — encoded size of the result
    fn on_complete(&self, output_bytes: usize) {
        let _ = output_bytes;
    }

    /// Called once when a conversion fails.
    ///
    /// # Arguments
    /// * `error` — human-readable error description
    fn on_error(&self, error: String) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgress;

impl ConvertProgress for NoopProgress {}

/// Convenience alias matching the type stored in [`crate::config::PipelineConfig`].
pub type ProgressCallback = Arc<dyn ConvertProgress>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        checkpoints: Mutex<Vec<u8>>,
        completes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl ConvertProgress for TrackingCallback {
        fn on_progress(&self, percent: u8, _status: String) {
            self.checkpoints.lock().unwrap().push(percent);
        }

        fn on_complete(&self, _output_bytes: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_error(&self, _error: String) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgress;
        cb.on_progress(20, "decoding image".into());
        cb.on_complete(1024);
        cb.on_error("some error".into());
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            checkpoints: Mutex::new(Vec::new()),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        };

        tracker.on_progress(20, "decoding image".into());
        tracker.on_progress(50, "preparing surface".into());
        tracker.on_progress(80, "encoding jpeg".into());
        tracker.on_progress(100, "conversion complete".into());
        tracker.on_complete(2048);

        assert_eq!(*tracker.checkpoints.lock().unwrap(), vec![20, 50, 80, 100]);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConvertProgress> = Arc::new(NoopProgress);
        cb.on_progress(50, "preparing surface".into());
        cb.on_complete(512);
    }
}
