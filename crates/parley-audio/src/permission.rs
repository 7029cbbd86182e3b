//! Microphone permission boundary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// The user granted microphone access.
    Granted,
    /// The user denied microphone access.
    Denied,
}

/// Platform permission prompt for microphone access.
///
/// Requesting twice is safe; platforms cache the grant after the first
/// prompt.
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Request (or re-check) microphone access.
    async fn request(&self) -> PermissionStatus;
}

/// Permission probe that always grants. Useful as a default on platforms
/// without a permission model.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysGranted;

#[async_trait]
impl MicrophonePermission for AlwaysGranted {
    async fn request(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// Mock permission probe for testing.
///
/// Returns a fixed status and counts how many times it was asked.
#[derive(Clone)]
pub struct MockPermission {
    status: PermissionStatus,
    requests: Arc<AtomicUsize>,
}

impl MockPermission {
    pub fn new(status: PermissionStatus) -> Self {
        Self {
            status,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `request` was called.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MicrophonePermission for MockPermission {
    async fn request(&self) -> PermissionStatus {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_granted() {
        assert_eq!(AlwaysGranted.request().await, PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn test_mock_permission_counts_requests() {
        let probe = MockPermission::new(PermissionStatus::Denied);
        assert_eq!(probe.request_count(), 0);
        assert_eq!(probe.request().await, PermissionStatus::Denied);
        assert_eq!(probe.request().await, PermissionStatus::Denied);
        assert_eq!(probe.request_count(), 2);
    }
}
