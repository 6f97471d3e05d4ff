use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::adapters::audio_file;
use crate::domain::report::{assign_track_numbers, BatchRecord};
use crate::domain::DomainError;
use crate::ports::Transcriber;

/// Transcribe every recognized audio file in a directory.
///
/// File names are sorted before processing so track numbers are stable
/// across platforms. A per-file failure (unreadable audio, engine error) is
/// recorded with an empty transcription and the batch continues; only a
/// missing or unreadable directory aborts.
pub async fn transcribe_directory(
    dir: &Path,
    engine: &dyn Transcriber,
) -> Result<Vec<BatchRecord>, DomainError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DomainError::FileAccess {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && audio_file::is_recognized_audio(path))
        .collect();
    files.sort();

    info!(dir = %dir.display(), files = files.len(), "Batch transcription started");

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let transcription = match transcribe_one(path, engine).await {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %file_name, error = %e, "Skipping file after transcription failure");
                String::new()
            }
        };

        records.push(BatchRecord::new(0, file_name, transcription));
    }

    assign_track_numbers(&mut records);

    info!(records = records.len(), "Batch transcription finished");
    Ok(records)
}

async fn transcribe_one(path: &Path, engine: &dyn Transcriber) -> Result<String, DomainError> {
    let signal = audio_file::load(path)?;
    let result = engine.transcribe(&signal).await?;
    Ok(result.text)
}
