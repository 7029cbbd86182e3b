//! Error types for the session controller.

use parley_client::ClientError;
use parley_core::error::ParleyError;

/// Errors from the conversation session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The realtime transport failed to connect or dropped mid-session.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A bookkeeping call was made before `open` succeeded.
    #[error("No backend session is open")]
    NoBackendSession,

    /// A backend REST call failed.
    #[error(transparent)]
    Backend(#[from] ClientError),
}

impl From<SessionError> for ParleyError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Transport(msg) => ParleyError::Transport(msg),
            SessionError::NoBackendSession => {
                ParleyError::Transport("no backend session is open".to_string())
            }
            SessionError::Backend(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = SessionError::Transport("websocket closed".to_string());
        assert_eq!(err.to_string(), "Transport error: websocket closed");
    }

    #[test]
    fn test_no_backend_session_display() {
        assert_eq!(
            SessionError::NoBackendSession.to_string(),
            "No backend session is open"
        );
    }

    #[test]
    fn test_backend_error_passthrough() {
        let err: SessionError = ClientError::Server {
            status: 500,
            endpoint: "/api/session/start".to_string(),
        }
        .into();
        assert!(err.to_string().contains("HTTP 500"));

        let parley: ParleyError = err.into();
        assert!(matches!(parley, ParleyError::Server { status: 500, .. }));
    }
}
