//! Ambient feedback: the looping ripple animation shown while the agent is
//! listening.
//!
//! The loop runs as a background tokio task and must never outlive its
//! owner: `stop` aborts the task synchronously, and dropping the feedback
//! object does the same, so an unmounted screen cannot leak a repeating
//! timer.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Looping feedback animation driven by session state.
///
/// Must run if and only if the session is `Active`.
pub trait AmbientFeedback: Send + Sync {
    /// Start the loop. Starting while running is a no-op.
    fn start(&self);

    /// Stop the loop synchronously. Stopping while idle is a no-op.
    fn stop(&self);

    /// Whether the loop is currently running.
    fn is_running(&self) -> bool;
}

/// One ripple cycle duration matching the original animation.
pub const RIPPLE_PERIOD: Duration = Duration::from_millis(2000);

/// Ripple animation loop backed by a tokio interval task.
///
/// Each tick advances the pulse counter; a renderer can derive scale and
/// opacity from it. `start` must be called from within a tokio runtime.
pub struct RippleFeedback {
    period: Duration,
    running: Arc<AtomicBool>,
    pulses: Arc<AtomicU64>,
    handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl Default for RippleFeedback {
    fn default() -> Self {
        Self::new(RIPPLE_PERIOD)
    }
}

impl RippleFeedback {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: Arc::new(AtomicBool::new(false)),
            pulses: Arc::new(AtomicU64::new(0)),
            handle: Mutex::new(None),
        }
    }

    /// Completed ripple cycles since the loop last started.
    pub fn pulse_count(&self) -> u64 {
        self.pulses.load(Ordering::Relaxed)
    }
}

impl AmbientFeedback for RippleFeedback {
    fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        self.pulses.store(0, Ordering::Relaxed);

        let running = Arc::clone(&self.running);
        let pulses = Arc::clone(&self.pulses);
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; skip it so a pulse means a
            // full cycle elapsed.
            interval.tick().await;
            while running.load(Ordering::SeqCst) {
                interval.tick().await;
                pulses.fetch_add(1, Ordering::Relaxed);
            }
        });

        *self.handle.lock().expect("feedback handle mutex poisoned") = Some(task);
        tracing::debug!("Ambient feedback started");
    }

    fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(task) = self
            .handle
            .lock()
            .expect("feedback handle mutex poisoned")
            .take()
        {
            task.abort();
        }
        tracing::debug!("Ambient feedback stopped");
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for RippleFeedback {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock feedback for testing: tracks running state and start/stop counts.
#[derive(Clone, Default)]
pub struct MockFeedback {
    running: Arc<AtomicBool>,
    starts: Arc<AtomicU64>,
    stops: Arc<AtomicU64>,
}

impl MockFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_count(&self) -> u64 {
        self.starts.load(Ordering::Relaxed)
    }

    pub fn stop_count(&self) -> u64 {
        self.stops.load(Ordering::Relaxed)
    }
}

impl AmbientFeedback for MockFeedback {
    fn start(&self) {
        if !self.running.swap(true, Ordering::SeqCst) {
            self.starts.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.stops.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Tests
// =============================================================================
