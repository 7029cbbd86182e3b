//! Conversation session controller - the realtime voice-session state
//! machine.
//!
//! Mediates between user intent (tap-to-toggle) and the realtime SDK's
//! session lifecycle, exposing a simplified status to the UI and implementing
//! a one-shot transport fallback policy. Transitions are a pure function of
//! `(state, event, transport mode, fallback flag)` producing a side-effect
//! list, so the machine is unit-testable without a real SDK.

pub mod bookkeeper;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod state;
pub mod transport;

pub use bookkeeper::SessionBookkeeper;
pub use controller::{ConversationController, Notice};
pub use error::SessionError;
pub use state::{transition, Effect, SessionEvent, SessionState, Transition, TransportMode};
pub use transport::{
    ConnectionStatus, MockTransport, RealtimeTransport, SessionOverrides, StartRequest,
    TransportEvent,
};
pub use feedback::{AmbientFeedback, MockFeedback, RippleFeedback};
