//! The conversation session controller.
//!
//! Owns the session state machine and executes its side effects against the
//! injected transport and feedback collaborators. All methods take `&mut
//! self` and are processed sequentially on one logical event stream; the
//! loading states (`Connecting`/`Ending`) debounce re-entrant taps.

use parley_audio::permission::{MicrophonePermission, PermissionStatus};
use parley_core::config::SessionConfig;

use crate::feedback::AmbientFeedback;
use crate::state::{
    transition, Effect, SessionEvent, SessionState, Transition, TransportMode,
};
use crate::transport::{RealtimeTransport, SessionOverrides, StartRequest, TransportEvent};

/// A one-time advisory surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn fallback() -> Self {
        Self {
            title: "Switching to Web Mode".to_string(),
            message: "We'll use a more compatible mode for your device.".to_string(),
        }
    }
}

/// Controller for one conversation screen.
///
/// Created when the screen mounts and dropped when the user navigates away;
/// the realtime session handle is exclusively owned for that lifetime. The
/// transport fallback is a one-way door: after the first connection failure
/// on the native transport, all later attempts use the fallback mode.
pub struct ConversationController {
    agent_id: String,
    config: SessionConfig,
    state: SessionState,
    mode: TransportMode,
    fallback_used: bool,
    transport: Box<dyn RealtimeTransport>,
    feedback: Box<dyn AmbientFeedback>,
    notices: Vec<Notice>,
}

impl ConversationController {
    /// Create a controller for the selected agent.
    ///
    /// Collaborators are passed in explicitly so tests can substitute fakes.
    pub fn new(
        agent_id: impl Into<String>,
        config: SessionConfig,
        transport: Box<dyn RealtimeTransport>,
        feedback: Box<dyn AmbientFeedback>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            config,
            state: SessionState::Idle,
            mode: TransportMode::NativeRealtime,
            fallback_used: false,
            transport,
            feedback,
            notices: Vec::new(),
        }
    }

    /// Request microphone access at screen mount.
    ///
    /// Denial is logged as a warning, not an error: the state machine is not
    /// gated on it, and an SDK session without the microphone fails
    /// downstream through the normal error path.
    pub async fn request_microphone(&self, permission: &dyn MicrophonePermission) {
        if permission.request().await != PermissionStatus::Granted {
            tracing::warn!("Microphone permission not granted");
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Display string for the current state.
    pub fn status_text(&self) -> &'static str {
        self.state.status_text()
    }

    /// Current transport mode.
    pub fn transport_mode(&self) -> TransportMode {
        self.mode
    }

    /// Whether a start/end request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Drain any notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Handle a tap on the talk control (toggle start/end).
    pub async fn tap(&mut self) {
        self.apply(SessionEvent::Tap).await;
    }

    /// Handle a callback event from the realtime SDK.
    pub async fn handle_transport_event(&mut self, event: TransportEvent) {
        let session_event = match event {
            TransportEvent::Connected => SessionEvent::Connected,
            TransportEvent::Disconnected => SessionEvent::Disconnected,
            TransportEvent::Failed(reason) => {
                tracing::error!(reason = %reason, mode = %self.mode, "Realtime session error");
                SessionEvent::Failed
            }
        };
        self.apply(session_event).await;
    }

    async fn apply(&mut self, mut event: SessionEvent) {
        loop {
            let previous = self.state;
            let Transition { next, effects } =
                transition(previous, event, self.mode, self.fallback_used);
            if next != previous {
                tracing::debug!("Session state: {} -> {}", previous, next);
            }
            self.state = next;

            let mut follow_up = None;
            for effect in effects {
                if let Some(ev) = self.run_effect(effect).await {
                    follow_up = Some(ev);
                }
            }
            match follow_up {
                Some(ev) => event = ev,
                None => break,
            }
        }
    }

    async fn run_effect(&mut self, effect: Effect) -> Option<SessionEvent> {
        match effect {
            Effect::StartSession => {
                let request = StartRequest {
                    agent_id: self.agent_id.clone(),
                    mode: self.mode,
                    overrides: SessionOverrides::from(&self.config),
                };
                tracing::info!(agent_id = %self.agent_id, mode = %self.mode, "Starting realtime session");
                match self.transport.start_session(request).await {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::error!(error = %e, "Error starting session");
                        Some(SessionEvent::Failed)
                    }
                }
            }
            Effect::EndSession => match self.transport.end_session().await {
                Ok(()) => None,
                Err(e) => {
                    tracing::error!(error = %e, "Error ending session");
                    Some(SessionEvent::Failed)
                }
            },
            Effect::StartFeedback => {
                self.feedback.start();
                None
            }
            Effect::StopFeedback => {
                self.feedback.stop();
                None
            }
            Effect::SwitchToFallback => {
                self.mode = TransportMode::FallbackEmbedded;
                self.fallback_used = true;
                tracing::warn!("Native transport failed; switching to fallback mode");
                None
            }
            Effect::ShowFallbackNotice => {
                self.notices.push(Notice::fallback());
                None
            }
        }
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        // The feedback loop must not outlive the screen.
        self.feedback.stop();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::MockFeedback;
    use crate::transport::MockTransport;
    use parley_audio::permission::MockPermission;

    const SUPPORT_AGENT: &str = "TkvOiYUSHLZyVnFgBnJr";

    fn controller(
        transport: &MockTransport,
        feedback: &MockFeedback,
    ) -> ConversationController {
        ConversationController::new(
            SUPPORT_AGENT,
            SessionConfig::default(),
            Box::new(transport.clone()),
            Box::new(feedback.clone()),
        )
    }

    #[tokio::test]
    async fn test_initial_state() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let ctl = controller(&transport, &feedback);

        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(ctl.status_text(), "Tap to talk");
        assert_eq!(ctl.transport_mode(), TransportMode::NativeRealtime);
        assert!(!ctl.is_loading());
    }

    #[tokio::test]
    async fn test_full_conversation_cycle() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        // Tap the orb: a start request goes out with the agent id.
        ctl.tap().await;
        assert_eq!(ctl.state(), SessionState::Connecting);
        assert_eq!(ctl.status_text(), "Connecting...");
        assert!(ctl.is_loading());
        assert_eq!(transport.start_count(), 1);
        let request = transport.last_request().unwrap();
        assert_eq!(request.agent_id, SUPPORT_AGENT);
        assert_eq!(request.mode, TransportMode::NativeRealtime);

        // SDK connects: listening, feedback running.
        ctl.handle_transport_event(TransportEvent::Connected).await;
        assert_eq!(ctl.state(), SessionState::Active);
        assert_eq!(ctl.status_text(), "Listening...");
        assert!(feedback.is_running());

        // Tap again: end requested.
        ctl.tap().await;
        assert_eq!(ctl.state(), SessionState::Ending);
        assert_eq!(ctl.status_text(), "Ending...");
        assert_eq!(transport.end_count(), 1);

        // SDK confirms the disconnect: back to idle, feedback stopped.
        ctl.handle_transport_event(TransportEvent::Disconnected).await;
        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(ctl.status_text(), "Tap to talk");
        assert!(!feedback.is_running());
    }

    #[tokio::test]
    async fn test_taps_while_loading_are_debounced() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        ctl.tap().await;
        ctl.tap().await;
        ctl.tap().await;
        // Exactly one underlying start request.
        assert_eq!(transport.start_count(), 1);

        ctl.handle_transport_event(TransportEvent::Connected).await;
        ctl.tap().await;
        ctl.tap().await;
        // Exactly one underlying end request.
        assert_eq!(transport.end_count(), 1);
    }

    #[tokio::test]
    async fn test_first_failure_falls_back_with_single_notice() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);
        transport.script_start_failure("native connect failed");

        ctl.tap().await;
        // First failure on native: reset to idle on the fallback transport.
        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(ctl.transport_mode(), TransportMode::FallbackEmbedded);
        let notices = ctl.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Switching to Web Mode");

        // Second attempt fails too: error state, no second notice, no
        // further mode change.
        transport.script_start_failure("fallback connect failed");
        ctl.tap().await;
        assert_eq!(ctl.state(), SessionState::Error);
        assert_eq!(ctl.status_text(), "Error - tap to retry");
        assert_eq!(ctl.transport_mode(), TransportMode::FallbackEmbedded);
        assert!(ctl.take_notices().is_empty());

        // The second request went out in fallback mode.
        assert_eq!(transport.start_count(), 2);
        assert_eq!(
            transport.last_request().unwrap().mode,
            TransportMode::FallbackEmbedded
        );
    }

    #[tokio::test]
    async fn test_fallback_fires_exactly_once_across_many_failures() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        for _ in 0..5 {
            transport.script_start_failure("no route");
            ctl.tap().await;
        }
        assert_eq!(ctl.transport_mode(), TransportMode::FallbackEmbedded);
        // One notice total, from the first failure only.
        assert_eq!(ctl.take_notices().len(), 1);
        assert_eq!(ctl.state(), SessionState::Error);
    }

    #[tokio::test]
    async fn test_retry_from_error_connects() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        transport.script_start_failure("first");
        ctl.tap().await;
        transport.script_start_failure("second");
        ctl.tap().await;
        assert_eq!(ctl.state(), SessionState::Error);

        // Third tap retries and succeeds.
        ctl.tap().await;
        assert_eq!(ctl.state(), SessionState::Connecting);
        ctl.handle_transport_event(TransportEvent::Connected).await;
        assert_eq!(ctl.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_unsolicited_disconnect_resets_feedback() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        ctl.tap().await;
        ctl.handle_transport_event(TransportEvent::Connected).await;
        assert!(feedback.is_running());

        ctl.handle_transport_event(TransportEvent::Disconnected).await;
        assert_eq!(ctl.state(), SessionState::Idle);
        assert!(!feedback.is_running());
        assert_eq!(transport.end_count(), 0);
    }

    #[tokio::test]
    async fn test_runtime_failure_while_active() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        ctl.tap().await;
        ctl.handle_transport_event(TransportEvent::Connected).await;

        ctl.handle_transport_event(TransportEvent::Failed("stream dropped".to_string()))
            .await;
        assert_eq!(ctl.state(), SessionState::Error);
        assert!(!feedback.is_running());
    }

    #[tokio::test]
    async fn test_feedback_runs_iff_active() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        assert!(!feedback.is_running());
        ctl.tap().await;
        assert!(!feedback.is_running());
        ctl.handle_transport_event(TransportEvent::Connected).await;
        assert!(feedback.is_running());
        ctl.tap().await;
        assert!(feedback.is_running()); // still active until disconnect lands
        ctl.handle_transport_event(TransportEvent::Disconnected).await;
        assert!(!feedback.is_running());
    }

    #[tokio::test]
    async fn test_drop_stops_feedback() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        {
            let mut ctl = controller(&transport, &feedback);
            ctl.tap().await;
            ctl.handle_transport_event(TransportEvent::Connected).await;
            assert!(feedback.is_running());
        }
        // Controller dropped while active: no dangling animation loop.
        assert!(!feedback.is_running());
    }

    #[tokio::test]
    async fn test_denied_microphone_does_not_gate_machine() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut ctl = controller(&transport, &feedback);

        let probe = MockPermission::new(PermissionStatus::Denied);
        ctl.request_microphone(&probe).await;
        assert_eq!(probe.request_count(), 1);

        // Still free to attempt a session; the SDK will fail downstream.
        ctl.tap().await;
        assert_eq!(ctl.state(), SessionState::Connecting);
    }

    #[tokio::test]
    async fn test_overrides_forwarded_from_config() {
        let transport = MockTransport::new();
        let feedback = MockFeedback::new();
        let mut config = SessionConfig::default();
        config.voice_id = Some("nova".to_string());
        let mut ctl = ConversationController::new(
            SUPPORT_AGENT,
            config,
            Box::new(transport.clone()),
            Box::new(feedback.clone()),
        );

        ctl.tap().await;
        let request = transport.last_request().unwrap();
        assert_eq!(request.overrides.voice_id.as_deref(), Some("nova"));
        assert!(request.overrides.websocket_only);
    }
}
