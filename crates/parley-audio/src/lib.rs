//! Microphone capture adapter - permission acquisition and a voice recorder
//! with a single-active-recording guarantee.
//!
//! The microphone is a scarce OS resource; the recorder enforces at most one
//! active recording at a time, and a second `start()` while recording is a
//! no-op. Platform capture sits behind a trait with a mock implementation for
//! testing without real hardware.

pub mod error;
pub mod permission;
pub mod recorder;

pub use error::AudioError;
pub use permission::{AlwaysGranted, MicrophonePermission, MockPermission, PermissionStatus};
pub use recorder::{CaptureBackend, MockCaptureBackend, VoiceRecorder};
