//! The session backend client.

use std::time::Duration;

use reqwest::multipart;
use tracing::{debug, error, warn};

use parley_core::types::{AudioClip, Speaker};

use crate::error::ClientError;
use crate::types::{
    ActionResult, PendingAction, PerformActionRequest, StartSessionRequest,
    StartSessionResponse, TranscriptionResult,
};

/// Thin HTTP wrapper for backend session lifecycle.
///
/// Constructed explicitly and passed into whoever needs it; never a module
/// singleton, so tests can point it at a loopback server.
#[derive(Clone, Debug)]
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SessionClient {
    /// Create a client against the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize(base_url.into()),
        }
    }

    /// Create a client with a per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize(base_url.into()),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Start a backend bookkeeping session for the given agent.
    ///
    /// Critical call: failures are logged and returned to the caller.
    pub async fn start_session(&self, agent_id: &str) -> Result<String, ClientError> {
        let endpoint = "/api/session/start".to_string();
        let result: Result<StartSessionResponse, ClientError> = async {
            let response = self
                .http
                .post(self.url(&endpoint))
                .json(&StartSessionRequest { agent_id })
                .send()
                .await?;
            let response = check_status(&endpoint, response)?;
            Ok(response.json().await?)
        }
        .await;

        match result {
            Ok(body) => {
                debug!(session_id = %body.session_id, agent_id, "Session started");
                Ok(body.session_id)
            }
            Err(e) => {
                error!(error = %e, agent_id, "Failed to start session");
                Err(e)
            }
        }
    }

    /// End a backend bookkeeping session.
    ///
    /// Best-effort call: failures are logged and degrade to `false`.
    pub async fn end_session(&self, session_id: &str) -> bool {
        let endpoint = format!("/api/session/{}/end", session_id);
        let result: Result<(), ClientError> = async {
            let response = self.http.put(self.url(&endpoint)).send().await?;
            check_status(&endpoint, response)?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                debug!(session_id, "Session ended");
                true
            }
            Err(e) => {
                warn!(error = %e, session_id, "Failed to end session");
                false
            }
        }
    }

    /// Upload a recorded clip for transcription.
    ///
    /// Critical call: failures are logged and returned to the caller.
    pub async fn upload_transcription(
        &self,
        session_id: &str,
        clip: &AudioClip,
        speaker: Speaker,
    ) -> Result<TranscriptionResult, ClientError> {
        let endpoint = format!("/api/transcribe/{}", session_id);
        let result: Result<TranscriptionResult, ClientError> = async {
            let audio = multipart::Part::bytes(clip.data.clone())
                .file_name(clip.file_name.clone())
                .mime_str(&clip.media_type)?;
            let form = multipart::Form::new()
                .part("audio", audio)
                .text("speaker", speaker.to_string());

            let response = self
                .http
                .post(self.url(&endpoint))
                .multipart(form)
                .send()
                .await?;
            let response = check_status(&endpoint, response)?;
            Ok(response.json().await?)
        }
        .await;

        match result {
            Ok(transcription) => {
                debug!(
                    session_id,
                    text_len = transcription.text.len(),
                    "Transcription uploaded"
                );
                Ok(transcription)
            }
            Err(e) => {
                error!(error = %e, session_id, "Failed to upload transcription");
                Err(e)
            }
        }
    }

    /// Fetch actions proposed by the backend that await user confirmation.
    ///
    /// Best-effort call: failures are logged and degrade to an empty list.
    pub async fn get_pending_actions(&self, session_id: &str) -> Vec<PendingAction> {
        let endpoint = format!("/api/action/{}/pending", session_id);
        let result: Result<Vec<PendingAction>, ClientError> = async {
            let response = self.http.get(self.url(&endpoint)).send().await?;
            let response = check_status(&endpoint, response)?;
            Ok(response.json().await?)
        }
        .await;

        match result {
            Ok(actions) => actions,
            Err(e) => {
                warn!(error = %e, session_id, "Failed to get pending actions");
                Vec::new()
            }
        }
    }

    /// Ask the backend to execute a previously proposed action.
    ///
    /// Critical call: failures are logged and returned to the caller.
    pub async fn perform_action(
        &self,
        session_id: &str,
        action_id: &str,
    ) -> Result<ActionResult, ClientError> {
        let endpoint = format!("/api/action/{}/perform", session_id);
        let result: Result<ActionResult, ClientError> = async {
            let response = self
                .http
                .post(self.url(&endpoint))
                .json(&PerformActionRequest { action_id })
                .send()
                .await?;
            let response = check_status(&endpoint, response)?;
            Ok(response.json().await?)
        }
        .await;

        match result {
            Ok(outcome) => {
                debug!(session_id, action_id, success = outcome.success, "Action performed");
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, session_id, action_id, "Failed to perform action");
                Err(e)
            }
        }
    }
}

fn normalize(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

fn check_status(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Server {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
