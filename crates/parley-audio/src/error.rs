//! Error types for audio capture.

use parley_core::error::ParleyError;

/// Errors from microphone capture.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// The user has not granted microphone access.
    #[error("Permission to access microphone was denied")]
    PermissionDenied,

    /// The capture backend failed.
    #[error("Capture error: {0}")]
    Capture(String),
}

impl From<AudioError> for ParleyError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::PermissionDenied => ParleyError::PermissionDenied,
            AudioError::Capture(msg) => ParleyError::Audio(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AudioError::PermissionDenied.to_string(),
            "Permission to access microphone was denied"
        );
        assert_eq!(
            AudioError::Capture("device lost".to_string()).to_string(),
            "Capture error: device lost"
        );
    }

    #[test]
    fn test_conversion_to_parley_error() {
        let err: ParleyError = AudioError::PermissionDenied.into();
        assert!(matches!(err, ParleyError::PermissionDenied));

        let err: ParleyError = AudioError::Capture("no device".to_string()).into();
        assert!(matches!(err, ParleyError::Audio(_)));
    }
}
