//! speechbench: a speech transcription quality pipeline.
//!
//! Loads an audio file, plots it, transcribes it with a cloud recognizer and
//! a local Whisper model, scores both against a reference transcript
//! (WER/CER), applies a pre-emphasis filter and re-scores, batch-transcribes
//! a directory into a CSV report, and synthesizes speech from text.
//!
//! # Architecture
//!
//! - `domain`: signal, configuration, error taxonomy, scoring, report rows
//! - `ports`: traits for transcription, synthesis, HTTP, and playback
//! - `adapters`: hound WAV I/O, whisper-rs engine, reqwest-backed cloud
//!   engines, CSV report writer, platform audio player
//! - `dsp`: pre-emphasis, resampling, STFT spectrogram
//! - `render`: waveform and spectrogram PNGs
//! - `app`: the sequential pipeline and the batch transcriber

#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod domain;
pub mod dsp;
pub mod infrastructure;
pub mod ports;
pub mod render;

// Re-exports for convenience
pub use app::{batch, Pipeline};
pub use domain::{metrics, AppConfig, BatchRecord, DomainError, ModelSize, Score, Signal};
pub use ports::{
    AudioPlayer, HttpClient, SpeechSynthesizer, TranscriptionResult, Transcriber,
};
