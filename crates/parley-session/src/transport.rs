//! Boundary to the external realtime conversational SDK.
//!
//! The SDK owns audio streaming, voice-activity detection, and connection
//! lifecycle; this crate only starts/ends sessions and reacts to its
//! callbacks. A mock implementation with scripted outcomes stands in for the
//! SDK in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use parley_core::config::SessionConfig;

use crate::error::SessionError;
use crate::state::TransportMode;

/// Fixed per-session configuration forwarded to the SDK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOverrides {
    /// Optional voice override for the agent's speech.
    pub voice_id: Option<String>,
    /// Restrict the native transport to websocket delivery.
    pub websocket_only: bool,
}

impl Default for SessionOverrides {
    fn default() -> Self {
        Self {
            voice_id: None,
            websocket_only: true,
        }
    }
}

impl From<&SessionConfig> for SessionOverrides {
    fn from(config: &SessionConfig) -> Self {
        Self {
            voice_id: config.voice_id.clone(),
            websocket_only: config.websocket_only,
        }
    }
}

/// Everything the SDK needs to open a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartRequest {
    /// Backend identifier of the selected agent.
    pub agent_id: String,
    /// Delivery mode to use for this attempt.
    pub mode: TransportMode,
    pub overrides: SessionOverrides,
}

/// Coarse connection state reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}

/// Callback events emitted by the SDK.
///
/// Assumed causally consistent: no `Connected` after `Disconnected` without
/// an intervening error/reconnect. The controller trusts this contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connected,
    Disconnected,
    Failed(String),
}

/// Entry points into the realtime SDK.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Request a new realtime session. Resolution of the request does not
    /// imply a connection; that arrives as a [`TransportEvent::Connected`].
    async fn start_session(&self, request: StartRequest) -> Result<(), SessionError>;

    /// Request teardown of the current session.
    async fn end_session(&self) -> Result<(), SessionError>;

    /// Current coarse connection state.
    fn status(&self) -> ConnectionStatus;
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock realtime transport for testing.
///
/// Records every start/end request and plays back scripted results for
/// `start_session` (defaulting to success once the script runs out).
#[derive(Clone, Default)]
pub struct MockTransport {
    starts: Arc<Mutex<Vec<StartRequest>>>,
    ends: Arc<AtomicUsize>,
    start_script: Arc<Mutex<VecDeque<Result<(), String>>>>,
    connected: Arc<AtomicBool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next `start_session` call.
    pub fn script_start_failure(&self, message: &str) {
        self.start_script
            .lock()
            .expect("start script mutex poisoned")
            .push_back(Err(message.to_string()));
    }

    /// Queue a success for the next `start_session` call.
    pub fn script_start_success(&self) {
        self.start_script
            .lock()
            .expect("start script mutex poisoned")
            .push_back(Ok(()));
    }

    /// Simulate the SDK's connect callback firing.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// Number of `start_session` calls observed.
    pub fn start_count(&self) -> usize {
        self.starts.lock().expect("starts mutex poisoned").len()
    }

    /// Number of `end_session` calls observed.
    pub fn end_count(&self) -> usize {
        self.ends.load(Ordering::Relaxed)
    }

    /// The most recent start request, if any.
    pub fn last_request(&self) -> Option<StartRequest> {
        self.starts
            .lock()
            .expect("starts mutex poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl RealtimeTransport for MockTransport {
    async fn start_session(&self, request: StartRequest) -> Result<(), SessionError> {
        self.starts
            .lock()
            .expect("starts mutex poisoned")
            .push(request);
        let scripted = self
            .start_script
            .lock()
            .expect("start script mutex poisoned")
            .pop_front();
        match scripted {
            Some(Err(msg)) => Err(SessionError::Transport(msg)),
            _ => Ok(()),
        }
    }

    async fn end_session(&self) -> Result<(), SessionError> {
        self.ends.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn status(&self) -> ConnectionStatus {
        if self.connected.load(Ordering::Relaxed) {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
