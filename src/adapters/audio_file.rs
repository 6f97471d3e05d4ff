//! WAV file loading and writing.

use std::io::Cursor;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{DomainError, Signal};

/// Load a WAV file into a mono f32 signal.
///
/// Integer formats are scaled to [-1, 1]; multi-channel audio is downmixed
/// to mono by averaging. A missing file is a `FileAccess` error, a file that
/// is not a readable WAV an `UnsupportedFormat` error; neither ever yields
/// empty data silently.
pub fn load(path: &Path) -> Result<Signal, DomainError> {
    if !path.exists() {
        return Err(DomainError::FileAccess {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }

    let mut reader = hound::WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) => DomainError::FileAccess {
            path: path.to_path_buf(),
            reason: io.to_string(),
        },
        other => DomainError::UnsupportedFormat(format!("{}: {}", path.display(), other)),
    })?;

    let spec = reader.spec();
    debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "Reading WAV file"
    );

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().filter_map(|s| s.ok()).collect(),
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .filter_map(|s| s.ok())
                .map(|s| s as f32 / max_val)
                .collect()
        }
    };

    // Downmix to mono if needed
    let mono: Vec<f32> = if spec.channels > 1 {
        samples
            .chunks(spec.channels as usize)
            .map(|chunk| chunk.iter().sum::<f32>() / spec.channels as f32)
            .collect()
    } else {
        samples
    };

    info!(
        path = %path.display(),
        samples = mono.len(),
        duration_secs = mono.len() as f32 / spec.sample_rate as f32,
        "Audio loaded"
    );

    Ok(Signal::new(mono, spec.sample_rate))
}

/// Write a signal as a 32-bit float mono WAV file.
pub fn save(path: &Path, signal: &Signal) -> Result<(), DomainError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| DomainError::FileAccess {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for &sample in signal.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!(path = %path.display(), samples = signal.len(), "Audio written");
    Ok(())
}

/// Encode a signal as an in-memory WAV buffer (for HTTP upload).
pub fn encode_wav(signal: &Signal) -> Result<Vec<u8>, DomainError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in signal.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// File extensions the batch transcriber recognizes as audio.
pub fn is_recognized_audio(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_wav_path(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        dir.path().join(name)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "tone.wav");

        let signal = Signal::new(vec![0.0, 0.25, -0.25, 0.5], 16000);
        save(&path, &signal).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.sample_rate(), 16000);
        assert_eq!(loaded.len(), 4);
        for (a, b) in loaded.samples().iter().zip(signal.samples()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Path::new("/nonexistent/missing.wav"));
        assert!(matches!(result, Err(DomainError::FileAccess { .. })));
    }

    #[test]
    fn test_load_non_wav_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "not_audio.wav");
        std::fs::write(&path, b"this is not a wav file at all").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(DomainError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_encode_wav_has_riff_header() {
        let signal = Signal::new(vec![0.1; 64], 16000);
        let bytes = encode_wav(&signal).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
    }

    #[test]
    fn test_recognized_extensions() {
        assert!(is_recognized_audio(Path::new("clip.wav")));
        assert!(is_recognized_audio(Path::new("CLIP.WAV")));
        assert!(!is_recognized_audio(Path::new("notes.txt")));
        assert!(!is_recognized_audio(Path::new("song.mp3")));
        assert!(!is_recognized_audio(Path::new("noextension")));
    }
}
