use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::domain::{DomainError, Signal};
use crate::dsp;
use crate::ports::{TranscriptionResult, Transcriber};

/// Sample rate the whisper.cpp models are trained on.
const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Local transcription engine backed by whisper.cpp via whisper-rs.
///
/// The model is loaded once at construction and the context is reused for
/// every call in the run; dropping the transcriber releases it. Input at
/// other sample rates is resampled to 16 kHz before inference.
pub struct WhisperTranscriber {
    context: Arc<WhisperContext>,
    language: String,
    threads: u32,
}

impl WhisperTranscriber {
    /// Load the model at `model_path`.
    ///
    /// `threads` = 0 auto-detects (cores - 1).
    pub fn new(model_path: &Path, language: &str, threads: u32) -> Result<Self, DomainError> {
        if !model_path.exists() {
            return Err(DomainError::ModelNotFound(
                model_path.to_string_lossy().to_string(),
            ));
        }

        let actual_threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|p| std::cmp::max(1, p.get() as u32 - 1))
                .unwrap_or(1)
        } else {
            threads
        };

        info!(path = %model_path.display(), threads = actual_threads, "Loading whisper model");

        let context = WhisperContext::new_with_params(
            &model_path.to_string_lossy(),
            WhisperContextParameters::default(),
        )
        .map_err(|e| DomainError::Model(format!("Failed to load model: {}", e)))?;

        info!("Whisper model loaded");

        Ok(Self {
            context: Arc::new(context),
            language: language.to_string(),
            threads: actual_threads,
        })
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &Signal) -> Result<TranscriptionResult, DomainError> {
        if audio.is_empty() {
            return Ok(TranscriptionResult::empty());
        }

        let prepared = if audio.sample_rate() == WHISPER_SAMPLE_RATE {
            audio.clone()
        } else {
            dsp::resample(audio, WHISPER_SAMPLE_RATE)?
        };

        debug!(
            samples = prepared.len(),
            duration_secs = prepared.duration_secs(),
            threads = self.threads,
            "Starting local transcription"
        );

        let start = std::time::Instant::now();

        let ctx = self.context.clone();
        let language = self.language.clone();
        let threads = self.threads;
        let samples = prepared.into_samples();

        // Inference is CPU-bound; keep it off the async executor.
        let text = tokio::task::spawn_blocking(move || {
            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_n_threads(threads as i32);
            params.set_language(Some(&language));
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);
            params.set_no_context(true);

            let mut state = ctx.create_state().map_err(|e| {
                DomainError::Transcription(format!("Failed to create whisper state: {}", e))
            })?;

            state
                .full(params, &samples)
                .map_err(|e| DomainError::Transcription(format!("Inference failed: {}", e)))?;

            let num_segments = state.full_n_segments().map_err(|e| {
                DomainError::Transcription(format!("Failed to get segment count: {}", e))
            })?;

            let mut text = String::new();
            for i in 0..num_segments {
                if let Ok(segment_text) = state.full_get_segment_text(i) {
                    if !text.is_empty() && !segment_text.starts_with(' ') {
                        text.push(' ');
                    }
                    text.push_str(segment_text.trim());
                }
            }

            Ok::<String, DomainError>(text.trim().to_string())
        })
        .await
        .map_err(|e| DomainError::Transcription(format!("Task join error: {}", e)))??;

        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            text_len = text.len(),
            duration_ms = duration_ms,
            "Local transcription complete"
        );

        Ok(TranscriptionResult { text, duration_ms })
    }

    fn name(&self) -> &str {
        "whisper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_an_error() {
        let result = WhisperTranscriber::new(Path::new("/nonexistent/ggml-base.bin"), "en", 4);
        assert!(matches!(result, Err(DomainError::ModelNotFound(_))));
    }
}
