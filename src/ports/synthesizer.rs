use async_trait::async_trait;

use crate::domain::DomainError;

/// Port for text-to-speech synthesis.
///
/// Implementations return encoded audio bytes (typically MP3); the caller
/// decides where they are written.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize speech for `text` in the given language.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, DomainError>;
}
