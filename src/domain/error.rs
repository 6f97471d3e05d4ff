use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors for speechbench.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot access {path}: {reason}")]
    FileAccess { path: PathBuf, reason: String },

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("No recognizable speech in audio")]
    NoSpeechDetected,

    #[error("Speech service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Reference text must not be empty")]
    EmptyReference,

    #[error("Report error: {0}")]
    Report(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<hound::Error> for DomainError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => DomainError::Io(e.to_string()),
            other => DomainError::UnsupportedFormat(other.to_string()),
        }
    }
}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        DomainError::Report(err.to_string())
    }
}

impl DomainError {
    /// Recoverable engine failures are substituted with an empty transcript
    /// by the pipeline instead of aborting the run.
    pub fn is_recoverable_transcription(&self) -> bool {
        matches!(
            self,
            DomainError::NoSpeechDetected | DomainError::ServiceUnavailable { .. }
        )
    }
}
