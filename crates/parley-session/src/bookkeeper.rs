//! Backend bookkeeping paired with the realtime session lifecycle.
//!
//! The realtime SDK session and the backend's notion of a session are
//! separate systems. `SessionBookkeeper` exposes the backend half as
//! explicit steps (`open` before/around connect, `close` around disconnect)
//! so an integrator can wire them to the controller's transitions, or not.

use tracing::{debug, warn};

use parley_client::{ActionResult, PendingAction, SessionClient, TranscriptionResult};
use parley_core::types::{AudioClip, Speaker};

use crate::error::SessionError;

/// Tracks one backend bookkeeping session.
pub struct SessionBookkeeper {
    client: SessionClient,
    session_id: Option<String>,
}

impl SessionBookkeeper {
    pub fn new(client: SessionClient) -> Self {
        Self {
            client,
            session_id: None,
        }
    }

    /// The open backend session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Open a backend session for the given agent.
    ///
    /// Critical step: failures propagate to the caller. Opening while a
    /// session is already open replaces it (the old id is abandoned, with a
    /// warning).
    pub async fn open(&mut self, agent_id: &str) -> Result<String, SessionError> {
        if let Some(old) = &self.session_id {
            warn!(session_id = %old, "Opening a new backend session over an existing one");
        }
        let session_id = self.client.start_session(agent_id).await?;
        self.session_id = Some(session_id.clone());
        Ok(session_id)
    }

    /// Close the open backend session.
    ///
    /// Best-effort: degrades to `false` on failure or when nothing is open.
    /// The local session id is cleared either way.
    pub async fn close(&mut self) -> bool {
        match self.session_id.take() {
            Some(session_id) => self.client.end_session(&session_id).await,
            None => {
                debug!("No backend session to close");
                false
            }
        }
    }

    /// Upload a recorded clip for transcription against the open session.
    pub async fn upload(
        &self,
        clip: &AudioClip,
        speaker: Speaker,
    ) -> Result<TranscriptionResult, SessionError> {
        let session_id = self.session_id.as_deref().ok_or(SessionError::NoBackendSession)?;
        Ok(self
            .client
            .upload_transcription(session_id, clip, speaker)
            .await?)
    }

    /// Fetch pending actions for the open session.
    ///
    /// Best-effort: an empty list when nothing is open or the call fails.
    pub async fn pending_actions(&self) -> Vec<PendingAction> {
        match self.session_id.as_deref() {
            Some(session_id) => self.client.get_pending_actions(session_id).await,
            None => Vec::new(),
        }
    }

    /// Perform a pending action against the open session.
    pub async fn perform(&self, action_id: &str) -> Result<ActionResult, SessionError> {
        let session_id = self.session_id.as_deref().ok_or(SessionError::NoBackendSession)?;
        Ok(self.client.perform_action(session_id, action_id).await?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use chrono::Utc;
    use serde_json::json;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/api/session/start",
                post(|| async { Json(json!({ "sessionId": "sess-9" })) }),
            )
            .route("/api/session/{id}/end", put(|| async { StatusCode::OK }))
            .route(
                "/api/action/{id}/pending",
                get(|| async { Json(json!([{ "id": "a-1" }])) }),
            )
            .route(
                "/api/action/{id}/perform",
                post(|| async { Json(json!({ "success": true })) }),
            )
    }

    #[tokio::test]
    async fn test_open_then_close() {
        let base = spawn_server(app()).await;
        let mut keeper = SessionBookkeeper::new(SessionClient::new(base));

        assert!(keeper.session_id().is_none());
        let id = keeper.open("TkvOiYUSHLZyVnFgBnJr").await.unwrap();
        assert_eq!(id, "sess-9");
        assert_eq!(keeper.session_id(), Some("sess-9"));

        assert!(keeper.close().await);
        assert!(keeper.session_id().is_none());
    }

    #[tokio::test]
    async fn test_close_without_open_degrades() {
        let base = spawn_server(app()).await;
        let mut keeper = SessionBookkeeper::new(SessionClient::new(base));
        assert!(!keeper.close().await);
    }

    #[tokio::test]
    async fn test_upload_without_open_is_err() {
        let base = spawn_server(app()).await;
        let keeper = SessionBookkeeper::new(SessionClient::new(base));
        let clip = AudioClip::new(vec![1, 2, 3], Utc::now(), 1.0);
        let result = keeper.upload(&clip, Speaker::User).await;
        assert!(matches!(result, Err(SessionError::NoBackendSession)));
    }

    #[tokio::test]
    async fn test_perform_without_open_is_err() {
        let base = spawn_server(app()).await;
        let keeper = SessionBookkeeper::new(SessionClient::new(base));
        let result = keeper.perform("a-1").await;
        assert!(matches!(result, Err(SessionError::NoBackendSession)));
    }

    #[tokio::test]
    async fn test_pending_actions_without_open_is_empty() {
        let base = spawn_server(app()).await;
        let keeper = SessionBookkeeper::new(SessionClient::new(base));
        assert!(keeper.pending_actions().await.is_empty());
    }

    #[tokio::test]
    async fn test_pending_and_perform_with_open_session() {
        let base = spawn_server(app()).await;
        let mut keeper = SessionBookkeeper::new(SessionClient::new(base));
        keeper.open("TkvOiYUSHLZyVnFgBnJr").await.unwrap();

        let actions = keeper.pending_actions().await;
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].id, "a-1");

        let result = keeper.perform(&actions[0].id).await.unwrap();
        assert!(result.success);
    }
}
