use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Signal};

/// Result of a transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Transcribed text.
    pub text: String,
    /// Transcription duration in milliseconds.
    pub duration_ms: u64,
}

impl TranscriptionResult {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            duration_ms: 0,
        }
    }
}

/// Port for transcription engines.
///
/// Implementations are interchangeable black boxes: a local whisper.cpp
/// model or a cloud recognizer behind HTTP. Failure semantics differ per
/// adapter; see the error taxonomy on `DomainError`.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a mono audio signal to text.
    async fn transcribe(&self, audio: &Signal) -> Result<TranscriptionResult, DomainError>;

    /// Engine name for status lines and logs.
    fn name(&self) -> &str;
}
