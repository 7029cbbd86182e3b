//! Voice recorder enforcing the single-active-recording invariant.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use parley_core::types::AudioClip;

use crate::error::AudioError;
use crate::permission::{MicrophonePermission, PermissionStatus};

/// Platform capture backend.
///
/// `begin` acquires the device and starts recording; `finish` releases it and
/// returns the encoded clip.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Acquire the microphone and start recording.
    async fn begin(&self) -> Result<(), AudioError>;

    /// Stop recording and return the captured clip.
    async fn finish(&self) -> Result<AudioClip, AudioError>;
}

/// Voice recorder over a [`CaptureBackend`] and a permission probe.
///
/// Guarantees at most one active recording at a time: a second `start()`
/// while recording is a no-op returning `false`, and `stop()` without an
/// active recording returns `None`.
pub struct VoiceRecorder {
    permission: Box<dyn MicrophonePermission>,
    backend: Box<dyn CaptureBackend>,
    recording: AtomicBool,
}

impl VoiceRecorder {
    pub fn new(
        permission: Box<dyn MicrophonePermission>,
        backend: Box<dyn CaptureBackend>,
    ) -> Self {
        Self {
            permission,
            backend,
            recording: AtomicBool::new(false),
        }
    }

    /// Start recording.
    ///
    /// Returns `Ok(true)` if a new recording started, `Ok(false)` if one was
    /// already active (no-op), or `Err` if permission was denied or the
    /// backend failed to acquire the device.
    pub async fn start(&self) -> Result<bool, AudioError> {
        // Claim the slot first so concurrent starts cannot both proceed.
        if self.recording.swap(true, Ordering::SeqCst) {
            tracing::debug!("Recording already in progress, start ignored");
            return Ok(false);
        }

        if self.permission.request().await != PermissionStatus::Granted {
            self.recording.store(false, Ordering::SeqCst);
            return Err(AudioError::PermissionDenied);
        }

        if let Err(e) = self.backend.begin().await {
            self.recording.store(false, Ordering::SeqCst);
            tracing::error!(error = %e, "Error starting recording");
            return Err(e);
        }

        tracing::info!("Recording started");
        Ok(true)
    }

    /// Stop recording and return the captured clip.
    ///
    /// Returns `None` if no recording was active or the backend failed to
    /// produce a clip (failure is logged, not raised).
    pub async fn stop(&self) -> Option<AudioClip> {
        if !self.recording.swap(false, Ordering::SeqCst) {
            return None;
        }

        match self.backend.finish().await {
            Ok(clip) => {
                tracing::info!(clip_id = %clip.id, duration_secs = clip.duration_secs, "Recording stopped");
                Some(clip)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error stopping recording");
                None
            }
        }
    }

    /// Whether a recording is currently active.
    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock capture backend for testing.
///
/// Counts begin/finish calls and returns a canned clip. Can be configured to
/// fail either call.
#[derive(Clone, Default)]
pub struct MockCaptureBackend {
    begins: Arc<Mutex<usize>>,
    finishes: Arc<Mutex<usize>>,
    fail_begin: Arc<AtomicBool>,
    fail_finish: Arc<AtomicBool>,
}

impl MockCaptureBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_count(&self) -> usize {
        *self.begins.lock().expect("begin count mutex poisoned")
    }

    pub fn finish_count(&self) -> usize {
        *self.finishes.lock().expect("finish count mutex poisoned")
    }

    pub fn set_fail_begin(&self, fail: bool) {
        self.fail_begin.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_finish(&self, fail: bool) {
        self.fail_finish.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl CaptureBackend for MockCaptureBackend {
    async fn begin(&self) -> Result<(), AudioError> {
        if self.fail_begin.load(Ordering::Relaxed) {
            return Err(AudioError::Capture("mock begin failure".to_string()));
        }
        *self.begins.lock().expect("begin count mutex poisoned") += 1;
        Ok(())
    }

    async fn finish(&self) -> Result<AudioClip, AudioError> {
        if self.fail_finish.load(Ordering::Relaxed) {
            return Err(AudioError::Capture("mock finish failure".to_string()));
        }
        *self.finishes.lock().expect("finish count mutex poisoned") += 1;
        Ok(AudioClip::new(vec![0u8; 256], Utc::now(), 3.0))
    }
}

// =============================================================================
// Tests
// =============================================================================
