//! Wire types for the session backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for `POST /api/session/start`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartSessionRequest<'a> {
    pub agent_id: &'a str,
}

/// Response from `POST /api/session/start`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartSessionResponse {
    pub session_id: String,
}

/// Body for `POST /api/action/{id}/perform`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PerformActionRequest<'a> {
    pub action_id: &'a str,
}

/// A backend-side action proposed during a session, awaiting user
/// confirmation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    /// Identifier passed back to `perform_action`.
    pub id: String,
    /// Human-readable description of what the action will do.
    #[serde(default)]
    pub description: String,
    /// Backend action kind (free-form).
    #[serde(default)]
    pub action_type: String,
    /// When the backend proposed the action.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of performing a pending action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Result of a transcription upload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResult {
    /// The transcribed text.
    #[serde(default)]
    pub text: String,
    /// Speaker label echoed back by the backend.
    #[serde(default)]
    pub speaker: String,
}
