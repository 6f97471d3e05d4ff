//! speechbench CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use speechbench::adapters::{
    audio_file, csv_report, CloudSynthesizer, ModelFetcher, ReqwestClient, SystemPlayer,
    WhisperTranscriber,
};
use speechbench::infrastructure::init_logging;
use speechbench::ports::{AudioPlayer, SpeechSynthesizer, Transcriber};
use speechbench::{batch, AppConfig, ModelSize, Pipeline};

/// Speech transcription quality pipeline
#[derive(Parser)]
#[command(name = "speechbench")]
#[command(about = "Transcribe audio, score quality against a reference, and report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: plot, transcribe, score, filter, batch, report, synthesize
    Run {
        /// Source audio file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Ground-truth reference transcript
        #[arg(short, long)]
        reference: Option<String>,

        /// Directory of audio files for batch transcription
        #[arg(short, long)]
        batch_dir: Option<PathBuf>,

        /// CSV report destination
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,

        /// Pre-emphasis coefficient in [0, 1)
        #[arg(long)]
        coefficient: Option<f32>,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<ModelSize>,

        /// Text to synthesize at the end of the run
        #[arg(long)]
        speak: Option<String>,

        /// Play the synthesized audio when done
        #[arg(long)]
        play: bool,
    },

    /// Transcribe a single audio file with the local model
    Transcribe {
        /// Input WAV file
        input: PathBuf,

        /// Whisper model size
        #[arg(short, long)]
        model: Option<ModelSize>,

        /// Language code (e.g. en, de, fr)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Batch-transcribe a directory and write the CSV report
    Batch {
        /// Directory of audio files
        dir: PathBuf,

        /// CSV report destination
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,

        /// Whisper model size
        #[arg(short, long)]
        model: Option<ModelSize>,
    },

    /// Synthesize speech from text
    Speak {
        /// Text to synthesize
        text: String,

        /// Language code
        #[arg(short, long)]
        language: Option<String>,

        /// Output audio file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Play the file after writing it
        #[arg(long)]
        play: bool,
    },

    /// Download a Whisper model into the models directory
    FetchModel {
        /// Model size (tiny, base, small, medium, large)
        #[arg(short, long, default_value = "base")]
        size: ModelSize,

        /// Override the models directory
        #[arg(long)]
        models_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if let Some(ref config_path) = cli.config {
        AppConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        AppConfig::default()
    };

    let _log_guard = init_logging(
        &config.logging.logs_dir,
        &config.logging.level,
        config.logging.file_logging,
    )?;

    match cli.command {
        Commands::Run {
            input,
            reference,
            batch_dir,
            report,
            coefficient,
            model,
            speak,
            play,
        } => {
            if let Some(input) = input {
                config.pipeline.source_audio_path = input;
            }
            if let Some(reference) = reference {
                config.pipeline.reference_text = reference;
            }
            if let Some(batch_dir) = batch_dir {
                config.pipeline.batch_directory_path = batch_dir;
            }
            if let Some(report) = report {
                config.pipeline.output_report_path = report;
            }
            if let Some(coefficient) = coefficient {
                config.pipeline.pre_emphasis_coefficient = coefficient;
            }
            if let Some(model) = model {
                config.transcription.model_size = model;
            }
            if let Some(speak) = speak {
                config.synthesis.text = speak;
            }
            if play {
                config.synthesis.play = true;
            }

            let pipeline =
                Pipeline::with_default_adapters(config).context("Failed to initialize pipeline")?;
            pipeline.run().await.context("Pipeline failed")?;
        }

        Commands::Transcribe {
            input,
            model,
            language,
        } => {
            if let Some(model) = model {
                config.transcription.model_size = model;
            }
            if let Some(language) = language {
                config.transcription.language = language;
            }

            let signal = audio_file::load(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;

            let engine = WhisperTranscriber::new(
                &config.transcription.model_path(),
                &config.transcription.language,
                config.transcription.threads,
            )
            .context("Failed to initialize transcription engine")?;

            let result = engine.transcribe(&signal).await?;
            println!("{}", result.text);
        }

        Commands::Batch { dir, report, model } => {
            if let Some(report) = report {
                config.pipeline.output_report_path = report;
            }
            if let Some(model) = model {
                config.transcription.model_size = model;
            }

            let engine = WhisperTranscriber::new(
                &config.transcription.model_path(),
                &config.transcription.language,
                config.transcription.threads,
            )
            .context("Failed to initialize transcription engine")?;

            let records = batch::transcribe_directory(&dir, &engine).await?;
            csv_report::write(&config.pipeline.output_report_path, &records)?;
            println!(
                "Report with {} rows written to {}",
                records.len(),
                config.pipeline.output_report_path.display()
            );
        }

        Commands::Speak {
            text,
            language,
            output,
            play,
        } => {
            if let Some(language) = language {
                config.synthesis.language = language;
            }
            if let Some(output) = output {
                config.synthesis.output_path = output;
            }

            let http = std::sync::Arc::new(ReqwestClient::new(config.cloud.timeout_secs)?);
            let synthesizer = CloudSynthesizer::new(http, config.synthesis.clone());

            let bytes = synthesizer
                .synthesize(&text, &config.synthesis.language)
                .await?;
            std::fs::write(&config.synthesis.output_path, &bytes).with_context(|| {
                format!("Failed to write {}", config.synthesis.output_path.display())
            })?;
            println!(
                "Synthesized speech written to {}",
                config.synthesis.output_path.display()
            );

            if play {
                SystemPlayer::new().play(&config.synthesis.output_path)?;
            }
        }

        Commands::FetchModel { size, models_dir } => {
            let dir = models_dir.unwrap_or_else(|| config.transcription.models_dir.clone());
            let http = std::sync::Arc::new(ReqwestClient::new(config.cloud.timeout_secs)?);
            let fetcher = ModelFetcher::new(http, dir);

            let path = fetcher.fetch(size).await?;
            println!("Model ready at {}", path.display());
        }
    }

    Ok(())
}
