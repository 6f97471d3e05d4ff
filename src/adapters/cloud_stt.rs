use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::audio_file;
use crate::domain::config::CloudConfig;
use crate::domain::{DomainError, Signal};
use crate::ports::{HttpClient, TranscriptionResult, Transcriber};

/// Cloud speech recognizer reached over HTTP.
///
/// The signal is uploaded as an in-memory WAV; the response is a JSON
/// envelope carrying the transcript. Failure mapping:
/// - transport errors, timeouts, 429 and 5xx -> `ServiceUnavailable`
/// - a successful response with an empty transcript -> `NoSpeechDetected`
/// Both are recoverable for the pipeline; other rejections are not.
pub struct CloudTranscriber {
    http: Arc<dyn HttpClient>,
    config: CloudConfig,
}

impl CloudTranscriber {
    pub fn new(http: Arc<dyn HttpClient>, config: CloudConfig) -> Self {
        Self { http, config }
    }

    /// Extract the transcript from a recognition response.
    ///
    /// Accepts both a flat `{"transcript": ...}` envelope and the nested
    /// `results.channels[].alternatives[].transcript` shape.
    fn parse_transcript(body: &str) -> Result<String, DomainError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| DomainError::Transcription(format!("Unparseable response: {}", e)))?;

        if let Some(text) = value.get("transcript").and_then(|t| t.as_str()) {
            return Ok(text.to_string());
        }

        if let Some(text) = value
            .pointer("/results/channels/0/alternatives/0/transcript")
            .and_then(|t| t.as_str())
        {
            return Ok(text.to_string());
        }

        Err(DomainError::Transcription(
            "Response carried no transcript field".to_string(),
        ))
    }
}

#[async_trait]
impl Transcriber for CloudTranscriber {
    async fn transcribe(&self, audio: &Signal) -> Result<TranscriptionResult, DomainError> {
        let wav = audio_file::encode_wav(audio)?;
        debug!(
            endpoint = %self.config.endpoint,
            bytes = wav.len(),
            "Uploading audio for recognition"
        );

        let start = std::time::Instant::now();

        let response = self
            .http
            .post_bytes(
                &self.config.endpoint,
                self.config.api_key.as_deref(),
                "audio/wav",
                wav,
            )
            .await
            .map_err(|e| DomainError::ServiceUnavailable {
                reason: e.to_string(),
            })?;

        if response.status == 429 || response.status >= 500 {
            return Err(DomainError::ServiceUnavailable {
                reason: format!("HTTP {}", response.status),
            });
        }
        if !response.is_success() {
            return Err(DomainError::Transcription(format!(
                "Service rejected request: HTTP {}",
                response.status
            )));
        }

        let text = Self::parse_transcript(&response.body)?;
        if text.trim().is_empty() {
            return Err(DomainError::NoSpeechDetected);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            text_len = text.len(),
            duration_ms = duration_ms,
            "Cloud transcription complete"
        );

        Ok(TranscriptionResult {
            text: text.trim().to_string(),
            duration_ms,
        })
    }

    fn name(&self) -> &str {
        "cloud"
    }
}
