use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who produced a stretch of audio or a transcription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The human user (default for uploaded recordings).
    #[default]
    User,
    /// The conversational agent.
    Agent,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Agent => write!(f, "agent"),
        }
    }
}

// =============================================================================
// Structs
// =============================================================================

/// A finished audio recording held in memory, ready for upload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Unique identifier for this clip.
    pub id: Uuid,
    /// File name presented to the backend (e.g. `recording.m4a`).
    pub file_name: String,
    /// MIME type of the encoded audio.
    pub media_type: String,
    /// Encoded audio bytes.
    pub data: Vec<u8>,
    /// When the recording started.
    pub started_at: DateTime<Utc>,
    /// Recording length in seconds.
    pub duration_secs: f32,
}

impl AudioClip {
    /// Create a clip with the backend's expected defaults (`recording.m4a`,
    /// `audio/m4a`).
    pub fn new(data: Vec<u8>, started_at: DateTime<Utc>, duration_secs: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: "recording.m4a".to_string(),
            media_type: "audio/m4a".to_string(),
            data,
            started_at,
            duration_secs,
        }
    }

    /// Returns whether the clip contains any audio data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
