use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::{
    audio_file, csv_report, CloudSynthesizer, CloudTranscriber, ReqwestClient, SystemPlayer,
    WhisperTranscriber,
};
use crate::app::batch;
use crate::domain::{metrics, AppConfig, DomainError, Signal};
use crate::ports::{AudioPlayer, SpeechSynthesizer, Transcriber};
use crate::{dsp, render};

/// The end-to-end demonstration pipeline.
///
/// Stages run strictly in sequence; each one completes before the next
/// starts. Engine collaborators are injected so the sequence can be
/// exercised without network access or a model file.
pub struct Pipeline {
    config: AppConfig,
    cloud: Box<dyn Transcriber>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    player: Box<dyn AudioPlayer>,
}

impl Pipeline {
    pub fn new(
        config: AppConfig,
        cloud: Box<dyn Transcriber>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        player: Box<dyn AudioPlayer>,
    ) -> Self {
        Self {
            config,
            cloud,
            synthesizer,
            player,
        }
    }

    /// Build a pipeline wired to the real adapters.
    pub fn with_default_adapters(config: AppConfig) -> Result<Self, DomainError> {
        let http = Arc::new(ReqwestClient::new(config.cloud.timeout_secs)?);
        let cloud = Box::new(CloudTranscriber::new(http.clone(), config.cloud.clone()));
        let synthesizer = Box::new(CloudSynthesizer::new(http, config.synthesis.clone()));
        let player = Box::new(SystemPlayer::new());
        Ok(Self::new(config, cloud, synthesizer, player))
    }

    /// Run the full pipeline, loading the local model as a stage-scoped
    /// resource.
    pub async fn run(&self) -> Result<(), DomainError> {
        let transcription = &self.config.transcription;
        let local = WhisperTranscriber::new(
            &transcription.model_path(),
            &transcription.language,
            transcription.threads,
        )?;
        self.run_with_local(&local).await
        // `local` drops here, releasing the model with the run
    }

    /// Run the full pipeline against a caller-provided local engine.
    pub async fn run_with_local(&self, local: &dyn Transcriber) -> Result<(), DomainError> {
        let pipeline = &self.config.pipeline;

        let reference = pipeline.reference_text.trim();
        if reference.is_empty() {
            return Err(DomainError::Config(
                "pipeline.reference_text must not be empty".to_string(),
            ));
        }
        let reference = reference.to_lowercase();

        // 1. Load source audio
        let signal = audio_file::load(&pipeline.source_audio_path)?;
        println!(
            "Loaded {} ({:.2}s at {} Hz)",
            pipeline.source_audio_path.display(),
            signal.duration_secs(),
            signal.sample_rate()
        );

        // 2. Waveform plot
        render::render_waveform(&signal, &pipeline.waveform_image_path)?;
        println!("Waveform written to {}", pipeline.waveform_image_path.display());

        // 3.+4. Cloud transcription of the source, scored against the reference
        let cloud_text = self.transcribe_or_empty(&signal).await?;
        println!("Cloud transcription: {}", display_text(&cloud_text));
        self.print_score(&reference, &cloud_text)?;

        // 5. Pre-emphasis filter, persisted next to the source
        let filtered = dsp::preemphasis(&signal, pipeline.pre_emphasis_coefficient)?;
        let filtered_path = pipeline.filtered_audio_path();
        audio_file::save(&filtered_path, &filtered)?;
        println!(
            "Pre-emphasized audio (coefficient {}) written to {}",
            pipeline.pre_emphasis_coefficient,
            filtered_path.display()
        );

        // 6. Spectrogram of the filtered signal
        let spectrogram = dsp::compute_spectrogram(
            &filtered,
            dsp::DEFAULT_WINDOW_SIZE,
            dsp::DEFAULT_HOP_SIZE,
        )?;
        render::render_spectrogram(&spectrogram, &pipeline.spectrogram_image_path)?;
        println!(
            "Spectrogram written to {}",
            pipeline.spectrogram_image_path.display()
        );

        // 7. Re-transcribe the filtered signal
        let filtered_text = self.transcribe_or_empty(&filtered).await?;
        println!("Cloud transcription (filtered): {}", display_text(&filtered_text));
        self.print_score(&reference, &filtered_text)?;

        // 8. Local transcription of the source
        let local_result = local.transcribe(&signal).await?;
        println!(
            "{} transcription: {} ({} ms)",
            capitalize(local.name()),
            display_text(&local_result.text),
            local_result.duration_ms
        );
        self.print_score(&reference, &local_result.text)?;

        // 9. Batch-transcribe the configured directory with the same engine
        let records = batch::transcribe_directory(&pipeline.batch_directory_path, local).await?;

        // 10. Write the CSV report
        csv_report::write(&pipeline.output_report_path, &records)?;
        println!(
            "Report with {} rows written to {}",
            records.len(),
            pipeline.output_report_path.display()
        );

        // 11. Synthesize the closing text and optionally play it
        self.synthesize_stage().await?;

        info!("Pipeline complete");
        Ok(())
    }

    /// Cloud transcription with the recoverable failures degraded to an
    /// empty transcript so scoring still runs.
    async fn transcribe_or_empty(&self, signal: &Signal) -> Result<String, DomainError> {
        match self.cloud.transcribe(signal).await {
            Ok(result) => Ok(result.text),
            Err(DomainError::NoSpeechDetected) => {
                info!(engine = self.cloud.name(), "No recognizable speech in audio");
                println!("The {} engine could not understand the audio.", self.cloud.name());
                Ok(String::new())
            }
            Err(DomainError::ServiceUnavailable { reason }) => {
                warn!(engine = self.cloud.name(), reason = %reason, "Speech service unavailable");
                println!("Speech service unavailable: {}", reason);
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    fn print_score(&self, reference_lower: &str, hypothesis: &str) -> Result<(), DomainError> {
        let score = metrics::score(reference_lower, &hypothesis.to_lowercase())?;
        println!("{}", score);
        Ok(())
    }

    async fn synthesize_stage(&self) -> Result<(), DomainError> {
        let synthesis = &self.config.synthesis;
        if synthesis.text.trim().is_empty() {
            info!("No synthesis text configured; skipping synthesis stage");
            return Ok(());
        }

        let bytes = self
            .synthesizer
            .synthesize(&synthesis.text, &synthesis.language)
            .await?;
        std::fs::write(&synthesis.output_path, &bytes).map_err(|e| DomainError::FileAccess {
            path: synthesis.output_path.clone(),
            reason: e.to_string(),
        })?;
        println!(
            "Synthesized speech written to {}",
            synthesis.output_path.display()
        );

        if synthesis.play {
            // Playback is best-effort; a missing player must not fail the run
            if let Err(e) = self.player.play(&synthesis.output_path) {
                warn!(error = %e, "Playback failed");
                println!("Could not play {}: {}", synthesis.output_path.display(), e);
            }
        }

        Ok(())
    }
}

fn display_text(text: &str) -> &str {
    if text.is_empty() {
        "<empty>"
    } else {
        text
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
