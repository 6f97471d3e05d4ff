use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::model::ModelSize;
use crate::domain::DomainError;

/// Pipeline stage inputs and outputs.
///
/// Every path the workflow touches is explicit configuration; nothing is
/// hard-coded in the stages themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Primary source audio file.
    pub source_audio_path: PathBuf,
    /// Ground-truth transcript for quality scoring. Must be non-empty.
    pub reference_text: String,
    /// Directory of audio files for batch transcription.
    pub batch_directory_path: PathBuf,
    /// Destination of the CSV batch report.
    pub output_report_path: PathBuf,
    /// Waveform plot destination.
    pub waveform_image_path: PathBuf,
    /// Spectrogram plot destination (rendered from the filtered signal).
    pub spectrogram_image_path: PathBuf,
    /// Pre-emphasis coefficient in [0, 1).
    pub pre_emphasis_coefficient: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_audio_path: PathBuf::from("speech_01.wav"),
            reference_text: String::new(),
            batch_directory_path: PathBuf::from("recordings"),
            output_report_path: PathBuf::from("transcriptions.csv"),
            waveform_image_path: PathBuf::from("waveform.png"),
            spectrogram_image_path: PathBuf::from("spectrogram_filtered.png"),
            pre_emphasis_coefficient: 0.97,
        }
    }
}

impl PipelineConfig {
    /// Path of the pre-emphasized copy, next to the source file.
    ///
    /// `speech_01.wav` becomes `filtered_speech_01.wav`; the source file is
    /// never modified.
    pub fn filtered_audio_path(&self) -> PathBuf {
        let name = self
            .source_audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());
        match self.source_audio_path.parent() {
            Some(parent) => parent.join(format!("filtered_{}", name)),
            None => PathBuf::from(format!("filtered_{}", name)),
        }
    }
}

/// Cloud speech recognizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Recognition endpoint; the request body is a WAV upload.
    pub endpoint: String,
    /// API key sent as an Authorization token. None for keyless endpoints.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.deepgram.com/v1/listen".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Local transcription engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Model size tier; resolves to `ggml-<size>.bin` under `models_dir`.
    pub model_size: ModelSize,
    /// Directory holding downloaded ggml models.
    pub models_dir: PathBuf,
    /// Language code (ISO 639-1, e.g. "en").
    pub language: String,
    /// Number of threads to use (0 = auto).
    pub threads: u32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_size: ModelSize::default(),
            models_dir: default_models_dir(),
            language: "en".to_string(),
            threads: 0,
        }
    }
}

impl TranscriptionConfig {
    /// Full path of the configured model file.
    pub fn model_path(&self) -> PathBuf {
        self.model_size.path_in(&self.models_dir)
    }
}

fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("speechbench").join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Translate-TTS style endpoint returning MP3 bytes.
    pub endpoint: String,
    /// Text to synthesize at the end of the pipeline.
    pub text: String,
    /// Language code for synthesis.
    pub language: String,
    /// Destination of the synthesized audio.
    pub output_path: PathBuf,
    /// Play the synthesized file with the platform player after writing it.
    pub play: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            text: String::new(),
            language: "en".to_string(),
            output_path: PathBuf::from("output.mp3"),
            play: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with daily rotation.
    pub file_logging: bool,
    /// Directory for rotated log files.
    pub logs_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            logs_dir: PathBuf::from("logs"),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub cloud: CloudConfig,
    pub transcription: TranscriptionConfig,
    pub synthesis: SynthesisConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| DomainError::FileAccess {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
