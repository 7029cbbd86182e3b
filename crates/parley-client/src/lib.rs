//! REST client for backend session bookkeeping.
//!
//! Thin wrapper over the session backend: session start/end, transcription
//! upload, and pending-action retrieval/execution. Error policy is deliberate
//! and per-endpoint: mutating/critical calls return `Err`, read/best-effort
//! calls degrade to an empty or `false` result (see each method).

pub mod client;
pub mod error;
pub mod types;

pub use client::SessionClient;
pub use error::ClientError;
pub use types::{ActionResult, PendingAction, TranscriptionResult};
