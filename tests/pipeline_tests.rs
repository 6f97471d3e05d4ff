//! Integration tests for the speechbench pipeline.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use speechbench::adapters::audio_file;
use speechbench::domain::config::{AppConfig, PipelineConfig, SynthesisConfig};
use speechbench::{
    AudioPlayer, DomainError, Pipeline, Signal, SpeechSynthesizer, TranscriptionResult,
    Transcriber,
};

/// Generate synthetic audio that loosely resembles speech formants.
fn generate_speech(sample_rate: u32, duration_secs: f32) -> Signal {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            0.3 * (2.0 * std::f32::consts::PI * 300.0 * t).sin()
                + 0.2 * (2.0 * std::f32::consts::PI * 1000.0 * t).sin()
                + 0.1 * (2.0 * std::f32::consts::PI * 2500.0 * t).sin()
        })
        .collect();
    Signal::new(samples, sample_rate)
}

/// Transcriber returning a fixed text, or a fixed error.
struct FixedTranscriber {
    text: Option<String>,
    error: fn() -> DomainError,
    name: &'static str,
}

impl FixedTranscriber {
    fn ok(name: &'static str, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            error: || DomainError::Transcription("unused".to_string()),
            name,
        }
    }

    fn failing(name: &'static str, error: fn() -> DomainError) -> Self {
        Self {
            text: None,
            error,
            name,
        }
    }
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio: &Signal) -> Result<TranscriptionResult, DomainError> {
        match &self.text {
            Some(text) => Ok(TranscriptionResult {
                text: text.clone(),
                duration_ms: 5,
            }),
            None => Err((self.error)()),
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

struct FixedSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FixedSynthesizer {
    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, DomainError> {
        Ok(b"ID3 fake mp3 payload".to_vec())
    }
}

#[derive(Default)]
struct RecordingPlayer {
    played: Mutex<Vec<PathBuf>>,
}

impl AudioPlayer for RecordingPlayer {
    fn play(&self, path: &Path) -> Result<(), DomainError> {
        self.played.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// A pipeline config with every artifact routed into a temp dir.
fn test_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.pipeline = PipelineConfig {
        source_audio_path: dir.join("speech_01.wav"),
        reference_text: "The quick brown fox".to_string(),
        batch_directory_path: dir.join("recordings"),
        output_report_path: dir.join("transcriptions.csv"),
        waveform_image_path: dir.join("waveform.png"),
        spectrogram_image_path: dir.join("spectrogram.png"),
        pre_emphasis_coefficient: 0.97,
    };
    config.synthesis = SynthesisConfig {
        text: "Thanks for listening".to_string(),
        output_path: dir.join("output.mp3"),
        play: false,
        ..SynthesisConfig::default()
    };
    config
}

fn prepare_workspace(dir: &Path) {
    let signal = generate_speech(16000, 1.0);
    audio_file::save(&dir.join("speech_01.wav"), &signal).unwrap();

    let recordings = dir.join("recordings");
    std::fs::create_dir_all(&recordings).unwrap();
    audio_file::save(&recordings.join("clip_b.wav"), &generate_speech(16000, 0.2)).unwrap();
    audio_file::save(&recordings.join("clip_a.wav"), &generate_speech(16000, 0.2)).unwrap();
    std::fs::write(recordings.join("readme.txt"), "not audio").unwrap();
}

fn pipeline_with(
    config: AppConfig,
    cloud: FixedTranscriber,
    player: Box<dyn AudioPlayer>,
) -> Pipeline {
    Pipeline::new(config, Box::new(cloud), Box::new(FixedSynthesizer), player)
}

#[tokio::test]
async fn full_pipeline_produces_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    prepare_workspace(dir.path());
    let config = test_config(dir.path());

    let pipeline = pipeline_with(
        config,
        FixedTranscriber::ok("cloud", "the quick brown fox"),
        Box::new(RecordingPlayer::default()),
    );
    let local = FixedTranscriber::ok("whisper", "the quick brown");

    pipeline.run_with_local(&local).await.unwrap();

    // Filtered audio preserves length and leaves the source untouched
    let source = audio_file::load(&dir.path().join("speech_01.wav")).unwrap();
    let filtered = audio_file::load(&dir.path().join("filtered_speech_01.wav")).unwrap();
    assert_eq!(source.len(), filtered.len());
    assert_eq!(source.sample_rate(), filtered.sample_rate());

    // Plots exist and are PNGs
    for name in ["waveform.png", "spectrogram.png"] {
        let bytes = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(&bytes[1..4], b"PNG", "{} is not a PNG", name);
    }

    // Report covers the two wav files, sorted, numbered from 1
    let report = std::fs::read_to_string(dir.path().join("transcriptions.csv")).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Track Number,File Name,Transcription");
    assert!(lines[1].starts_with("1,clip_a.wav"));
    assert!(lines[2].starts_with("2,clip_b.wav"));
    assert_eq!(lines.len(), 3);

    // Synthesized audio was written
    let mp3 = std::fs::read(dir.path().join("output.mp3")).unwrap();
    assert!(!mp3.is_empty());
}

#[tokio::test]
async fn service_outage_degrades_to_empty_transcript() {
    let dir = tempfile::tempdir().unwrap();
    prepare_workspace(dir.path());
    let config = test_config(dir.path());

    let pipeline = pipeline_with(
        config,
        FixedTranscriber::failing("cloud", || DomainError::ServiceUnavailable {
            reason: "connection refused".to_string(),
        }),
        Box::new(RecordingPlayer::default()),
    );
    let local = FixedTranscriber::ok("whisper", "anything");

    // The run still completes; scoring saw an empty hypothesis
    pipeline.run_with_local(&local).await.unwrap();
    assert!(dir.path().join("transcriptions.csv").exists());
}

#[tokio::test]
async fn unrecognized_speech_degrades_to_empty_transcript() {
    let dir = tempfile::tempdir().unwrap();
    prepare_workspace(dir.path());
    let config = test_config(dir.path());

    let pipeline = pipeline_with(
        config,
        FixedTranscriber::failing("cloud", || DomainError::NoSpeechDetected),
        Box::new(RecordingPlayer::default()),
    );
    let local = FixedTranscriber::ok("whisper", "anything");

    pipeline.run_with_local(&local).await.unwrap();
}

#[tokio::test]
async fn local_engine_failure_is_fatal_for_the_single_file_stage() {
    let dir = tempfile::tempdir().unwrap();
    prepare_workspace(dir.path());
    let config = test_config(dir.path());

    let pipeline = pipeline_with(
        config,
        FixedTranscriber::ok("cloud", "text"),
        Box::new(RecordingPlayer::default()),
    );
    let local =
        FixedTranscriber::failing("whisper", || DomainError::Transcription("boom".to_string()));

    let result = pipeline.run_with_local(&local).await;
    assert!(matches!(result, Err(DomainError::Transcription(_))));
}

#[tokio::test]
async fn missing_source_audio_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // No workspace prepared: source file absent
    let config = test_config(dir.path());

    let pipeline = pipeline_with(
        config,
        FixedTranscriber::ok("cloud", "text"),
        Box::new(RecordingPlayer::default()),
    );
    let local = FixedTranscriber::ok("whisper", "text");

    let result = pipeline.run_with_local(&local).await;
    assert!(matches!(result, Err(DomainError::FileAccess { .. })));
}

#[tokio::test]
async fn empty_reference_is_rejected_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    prepare_workspace(dir.path());
    let mut config = test_config(dir.path());
    config.pipeline.reference_text = "   ".to_string();

    let pipeline = pipeline_with(
        config,
        FixedTranscriber::ok("cloud", "text"),
        Box::new(RecordingPlayer::default()),
    );
    let local = FixedTranscriber::ok("whisper", "text");

    let result = pipeline.run_with_local(&local).await;
    assert!(matches!(result, Err(DomainError::Config(_))));
    // Nothing was produced
    assert!(!dir.path().join("waveform.png").exists());
}

#[tokio::test]
async fn playback_is_invoked_when_enabled_and_failure_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    prepare_workspace(dir.path());
    let mut config = test_config(dir.path());
    config.synthesis.play = true;
    let expected_output = config.synthesis.output_path.clone();

    struct FailingPlayer;
    impl AudioPlayer for FailingPlayer {
        fn play(&self, _path: &Path) -> Result<(), DomainError> {
            Err(DomainError::Playback("no audio device".to_string()))
        }
    }

    // A failing player must not fail the run
    let pipeline = pipeline_with(
        config.clone(),
        FixedTranscriber::ok("cloud", "text"),
        Box::new(FailingPlayer),
    );
    let local = FixedTranscriber::ok("whisper", "text");
    pipeline.run_with_local(&local).await.unwrap();

    // A working player receives the synthesized file path
    let player = Box::leak(Box::new(RecordingPlayer::default()));
    let pipeline = Pipeline::new(
        config,
        Box::new(FixedTranscriber::ok("cloud", "text")),
        Box::new(FixedSynthesizer),
        Box::new(PlayerRef(player)),
    );
    pipeline.run_with_local(&local).await.unwrap();
    assert_eq!(player.played.lock().unwrap().as_slice(), &[expected_output]);
}

/// Borrowing wrapper so the test can inspect a player owned elsewhere.
struct PlayerRef(&'static RecordingPlayer);

impl AudioPlayer for PlayerRef {
    fn play(&self, path: &Path) -> Result<(), DomainError> {
        self.0.play(path)
    }
}
