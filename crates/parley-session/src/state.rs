//! The conversation session state machine.
//!
//! States and transitions:
//! - Idle -> Connecting (user tap starts a session)
//! - Connecting -> Active (transport connected)
//! - Connecting -> Idle (first failure on the native transport: fall back)
//! - Connecting -> Error (failure with no fallback left)
//! - Active -> Ending (user tap requests session end)
//! - Active -> Idle (unsolicited disconnect)
//! - Ending -> Idle (disconnect confirmation)
//! - Error -> Connecting (user tap retries)
//!
//! `transition` is a pure function returning the next state plus a list of
//! side effects for the controller to execute; it never performs I/O itself.

use std::fmt;

/// Operational state of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No session in progress. Ready to start.
    Idle,
    /// A session-start request is in flight.
    Connecting,
    /// Connected; the agent is listening.
    Active,
    /// A session-end request is in flight.
    Ending,
    /// The last attempt failed. A tap retries.
    Error,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Connecting => write!(f, "Connecting"),
            SessionState::Active => write!(f, "Active"),
            SessionState::Ending => write!(f, "Ending"),
            SessionState::Error => write!(f, "Error"),
        }
    }
}

impl SessionState {
    /// Display string shown to the user for this state.
    pub fn status_text(&self) -> &'static str {
        match self {
            SessionState::Idle => "Tap to talk",
            SessionState::Connecting => "Connecting...",
            SessionState::Active => "Listening...",
            SessionState::Ending => "Ending...",
            SessionState::Error => "Error - tap to retry",
        }
    }

    /// Whether a request is in flight; taps are ignored while loading.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Connecting | SessionState::Ending)
    }
}

/// Delivery mode for the realtime session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    /// Native realtime connection (websocket).
    NativeRealtime,
    /// Embedded/alternate delivery mode used after the native transport
    /// failed once.
    FallbackEmbedded,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::NativeRealtime => write!(f, "native"),
            TransportMode::FallbackEmbedded => write!(f, "fallback"),
        }
    }
}

/// Input to the state machine: user intent or a transport callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user tapped the talk control.
    Tap,
    /// The transport reported a successful connection.
    Connected,
    /// The transport reported a disconnect (solicited or not).
    Disconnected,
    /// The transport reported an error.
    Failed,
}

/// Side effect requested by a transition; executed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Ask the transport to start a session with the selected agent.
    StartSession,
    /// Ask the transport to end the current session.
    EndSession,
    /// Begin the looping ambient feedback animation.
    StartFeedback,
    /// Stop the ambient feedback animation.
    StopFeedback,
    /// Irreversibly switch to the fallback transport mode.
    SwitchToFallback,
    /// Surface the one-time fallback notice to the user.
    ShowFallbackNotice,
}

/// Result of applying one event: the next state plus requested effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(next: SessionState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }

    fn stay(state: SessionState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }
}

/// Apply one event to the state machine.
///
/// `mode` and `fallback_used` decide the failure branch: the first failure on
/// the native transport falls back and resets to `Idle`; any later failure
/// surfaces `Error`. Unlisted `(state, event)` pairs are no-ops.
pub fn transition(
    state: SessionState,
    event: SessionEvent,
    mode: TransportMode,
    fallback_used: bool,
) -> Transition {
    use Effect::*;
    use SessionEvent::*;
    use SessionState::*;

    match (state, event) {
        (Idle, Tap) => Transition::to(Connecting, vec![StartSession]),
        (Error, Tap) => Transition::to(Connecting, vec![StartSession]),
        (Active, Tap) => Transition::to(Ending, vec![EndSession]),

        (Connecting, Connected) => Transition::to(Active, vec![StartFeedback]),
        (Connecting, Failed) => {
            if mode == TransportMode::NativeRealtime && !fallback_used {
                Transition::to(Idle, vec![SwitchToFallback, ShowFallbackNotice])
            } else {
                Transition::to(SessionState::Error, vec![])
            }
        }

        (Active, Disconnected) => Transition::to(Idle, vec![StopFeedback]),
        (Active, Failed) => Transition::to(SessionState::Error, vec![StopFeedback]),

        (Ending, Disconnected) => Transition::to(Idle, vec![StopFeedback]),
        (Ending, Failed) => Transition::to(SessionState::Error, vec![StopFeedback]),

        // Taps while a request is in flight are debounced; stray transport
        // events in other states are ignored.
        _ => Transition::stay(state),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn native(state: SessionState, event: SessionEvent) -> Transition {
        transition(state, event, TransportMode::NativeRealtime, false)
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Connecting.to_string(), "Connecting");
        assert_eq!(SessionState::Active.to_string(), "Active");
        assert_eq!(SessionState::Ending.to_string(), "Ending");
        assert_eq!(SessionState::Error.to_string(), "Error");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(SessionState::Idle.status_text(), "Tap to talk");
        assert_eq!(SessionState::Connecting.status_text(), "Connecting...");
        assert_eq!(SessionState::Active.status_text(), "Listening...");
        assert_eq!(SessionState::Ending.status_text(), "Ending...");
        assert_eq!(SessionState::Error.status_text(), "Error - tap to retry");
    }

    #[test]
    fn test_is_loading() {
        assert!(SessionState::Connecting.is_loading());
        assert!(SessionState::Ending.is_loading());
        assert!(!SessionState::Idle.is_loading());
        assert!(!SessionState::Active.is_loading());
        assert!(!SessionState::Error.is_loading());
    }

    #[test]
    fn test_idle_tap_starts_session() {
        let t = native(SessionState::Idle, SessionEvent::Tap);
        assert_eq!(t.next, SessionState::Connecting);
        assert_eq!(t.effects, vec![Effect::StartSession]);
    }

    #[test]
    fn test_error_tap_retries() {
        let t = native(SessionState::Error, SessionEvent::Tap);
        assert_eq!(t.next, SessionState::Connecting);
        assert_eq!(t.effects, vec![Effect::StartSession]);
    }

    #[test]
    fn test_connect_success_starts_feedback() {
        let t = native(SessionState::Connecting, SessionEvent::Connected);
        assert_eq!(t.next, SessionState::Active);
        assert_eq!(t.effects, vec![Effect::StartFeedback]);
    }

    #[test]
    fn test_first_native_failure_falls_back() {
        let t = native(SessionState::Connecting, SessionEvent::Failed);
        assert_eq!(t.next, SessionState::Idle);
        assert_eq!(
            t.effects,
            vec![Effect::SwitchToFallback, Effect::ShowFallbackNotice]
        );
    }

    #[test]
    fn test_failure_after_fallback_is_error() {
        let t = transition(
            SessionState::Connecting,
            SessionEvent::Failed,
            TransportMode::FallbackEmbedded,
            true,
        );
        assert_eq!(t.next, SessionState::Error);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_native_failure_with_fallback_already_used_is_error() {
        // The controller never reports native mode with the fallback flag
        // set, but the machine must not fall back twice if it ever does.
        let t = transition(
            SessionState::Connecting,
            SessionEvent::Failed,
            TransportMode::NativeRealtime,
            true,
        );
        assert_eq!(t.next, SessionState::Error);
    }

    #[test]
    fn test_active_tap_requests_end() {
        let t = native(SessionState::Active, SessionEvent::Tap);
        assert_eq!(t.next, SessionState::Ending);
        assert_eq!(t.effects, vec![Effect::EndSession]);
    }

    #[test]
    fn test_unsolicited_disconnect_resets() {
        let t = native(SessionState::Active, SessionEvent::Disconnected);
        assert_eq!(t.next, SessionState::Idle);
        assert_eq!(t.effects, vec![Effect::StopFeedback]);
    }

    #[test]
    fn test_ending_disconnect_confirmation() {
        let t = native(SessionState::Ending, SessionEvent::Disconnected);
        assert_eq!(t.next, SessionState::Idle);
        assert_eq!(t.effects, vec![Effect::StopFeedback]);
    }

    #[test]
    fn test_runtime_failure_stops_feedback() {
        let t = native(SessionState::Active, SessionEvent::Failed);
        assert_eq!(t.next, SessionState::Error);
        assert_eq!(t.effects, vec![Effect::StopFeedback]);
    }

    #[test]
    fn test_tap_while_loading_is_noop() {
        for state in [SessionState::Connecting, SessionState::Ending] {
            let t = native(state, SessionEvent::Tap);
            assert_eq!(t.next, state);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn test_stray_events_are_noops() {
        let strays = [
            (SessionState::Idle, SessionEvent::Connected),
            (SessionState::Idle, SessionEvent::Disconnected),
            (SessionState::Idle, SessionEvent::Failed),
            (SessionState::Error, SessionEvent::Disconnected),
            (SessionState::Active, SessionEvent::Connected),
        ];
        for (state, event) in strays {
            let t = native(state, event);
            assert_eq!(t.next, state);
            assert!(t.effects.is_empty());
        }
    }
}
