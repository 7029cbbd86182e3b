//! Speech output adapter - wraps a platform text-to-speech capability.
//!
//! Both operations are best-effort: errors from the underlying engine are
//! swallowed and logged, and the caller only sees a boolean. Includes a mock
//! implementation for testing without a real speech engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use parley_core::config::SpeechConfig;
use parley_core::error::ParleyError;

/// Parameters for one utterance.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechOptions {
    /// BCP-47 language tag (doubles as a coarse voice selector).
    pub language: String,
    /// Voice pitch multiplier.
    pub pitch: f32,
    /// Speaking rate multiplier.
    pub rate: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            pitch: 1.0,
            rate: 0.9,
        }
    }
}

impl From<&SpeechConfig> for SpeechOptions {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            language: config.language.clone(),
            pitch: config.pitch,
            rate: config.rate,
        }
    }
}

/// Low-level speech engine boundary.
///
/// Implementations talk to the actual platform TTS capability and may fail;
/// the [`SpeechOutput`] wrapper turns those failures into logged booleans.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speak the given text with the given options.
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), ParleyError>;

    /// Stop any in-progress utterance.
    fn stop(&self) -> Result<(), ParleyError>;
}

/// Best-effort speech output over a [`SpeechEngine`].
pub struct SpeechOutput {
    engine: Box<dyn SpeechEngine>,
    defaults: SpeechOptions,
}

impl SpeechOutput {
    /// Wrap an engine with default options.
    pub fn new(engine: Box<dyn SpeechEngine>, defaults: SpeechOptions) -> Self {
        Self { engine, defaults }
    }

    /// Speak text with the default options.
    ///
    /// Returns `true` on success; engine errors are logged and reported as
    /// `false`, never raised.
    pub async fn speak(&self, text: &str) -> bool {
        let options = self.defaults.clone();
        self.speak_with(text, &options).await
    }

    /// Speak text with explicit options.
    pub async fn speak_with(&self, text: &str, options: &SpeechOptions) -> bool {
        match self.engine.speak(text, options).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Error speaking text");
                false
            }
        }
    }

    /// Stop any in-progress utterance.
    ///
    /// Returns `true` on success; errors are logged and reported as `false`.
    pub fn stop(&self) -> bool {
        match self.engine.stop() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Error stopping speech");
                false
            }
        }
    }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock speech engine for testing.
///
/// Records spoken utterances and tracks whether speech is "in progress".
/// Can be configured to fail every call.
#[derive(Clone, Default)]
pub struct MockSpeechEngine {
    spoken: Arc<Mutex<Vec<(String, SpeechOptions)>>>,
    speaking: Arc<AtomicBool>,
    fail: Arc<AtomicBool>,
}

impl MockSpeechEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }

    /// Utterances recorded so far.
    pub fn spoken(&self) -> Vec<(String, SpeechOptions)> {
        self.spoken.lock().expect("spoken mutex poisoned").clone()
    }

    /// Whether an utterance is currently "playing".
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpeechEngine for MockSpeechEngine {
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), ParleyError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(ParleyError::Speech("mock engine failure".to_string()));
        }
        self.spoken
            .lock()
            .expect("spoken mutex poisoned")
            .push((text.to_string(), options.clone()));
        self.speaking.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn stop(&self) -> Result<(), ParleyError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(ParleyError::Speech("mock engine failure".to_string()));
        }
        self.speaking.store(false, Ordering::Relaxed);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn output_with(engine: &MockSpeechEngine) -> SpeechOutput {
        SpeechOutput::new(Box::new(engine.clone()), SpeechOptions::default())
    }

    #[tokio::test]
    async fn test_speak_records_utterance() {
        let engine = MockSpeechEngine::new();
        let output = output_with(&engine);

        assert!(output.speak("Hello there").await);
        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].0, "Hello there");
        assert_eq!(spoken[0].1.language, "en-US");
        assert_eq!(spoken[0].1.rate, 0.9);
    }

    #[tokio::test]
    async fn test_speak_with_custom_options() {
        let engine = MockSpeechEngine::new();
        let output = output_with(&engine);

        let options = SpeechOptions {
            language: "fr-FR".to_string(),
            pitch: 1.2,
            rate: 1.0,
        };
        assert!(output.speak_with("Bonjour", &options).await);
        assert_eq!(engine.spoken()[0].1.language, "fr-FR");
    }

    #[tokio::test]
    async fn test_speak_failure_returns_false() {
        let engine = MockSpeechEngine::new();
        engine.set_failing(true);
        let output = output_with(&engine);

        // Best-effort: failure is swallowed, not raised.
        assert!(!output.speak("Hello").await);
        assert!(engine.spoken().is_empty());
    }

    #[tokio::test]
    async fn test_stop_clears_speaking() {
        let engine = MockSpeechEngine::new();
        let output = output_with(&engine);

        output.speak("Hello").await;
        assert!(engine.is_speaking());
        assert!(output.stop());
        assert!(!engine.is_speaking());
    }

    #[tokio::test]
    async fn test_stop_failure_returns_false() {
        let engine = MockSpeechEngine::new();
        let output = output_with(&engine);
        engine.set_failing(true);
        assert!(!output.stop());
    }

    #[test]
    fn test_options_from_config() {
        let config = SpeechConfig::default();
        let options = SpeechOptions::from(&config);
        assert_eq!(options, SpeechOptions::default());
    }
}
