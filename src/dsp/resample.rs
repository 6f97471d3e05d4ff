use rubato::{FftFixedIn, Resampler};
use tracing::debug;

use crate::domain::{DomainError, Signal};

/// Resample a mono signal to `target_rate`.
///
/// Uses an FFT resampler fed in fixed-size chunks; the tail is zero-padded to
/// fill the final chunk and the output is truncated to the expected length.
pub fn resample(signal: &Signal, target_rate: u32) -> Result<Signal, DomainError> {
    if signal.sample_rate() == target_rate {
        return Ok(signal.clone());
    }
    if signal.is_empty() {
        return Ok(Signal::new(Vec::new(), target_rate));
    }

    debug!(
        from = signal.sample_rate(),
        to = target_rate,
        samples = signal.len(),
        "Resampling signal"
    );

    let mut resampler = FftFixedIn::<f32>::new(
        signal.sample_rate() as usize,
        target_rate as usize,
        1024, // chunk size
        2,    // sub-chunks
        1,    // channels
    )
    .map_err(|e| DomainError::Audio(format!("Failed to create resampler: {}", e)))?;

    let expected =
        (signal.len() as u64 * target_rate as u64 / signal.sample_rate() as u64) as usize;

    let samples = signal.samples();
    let mut output: Vec<f32> = Vec::with_capacity(expected + 2048);
    let mut pos = 0;

    while pos < samples.len() {
        let needed = resampler.input_frames_next();
        let mut chunk = vec![0.0f32; needed];
        let take = needed.min(samples.len() - pos);
        chunk[..take].copy_from_slice(&samples[pos..pos + take]);
        pos += take;

        let mut frames = resampler
            .process(&[chunk], None)
            .map_err(|e| DomainError::Audio(format!("Resampling failed: {}", e)))?;
        output.append(&mut frames[0]);
    }

    output.truncate(expected);
    Ok(Signal::new(output, target_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_passthrough() {
        let signal = Signal::new(vec![0.1, 0.2, 0.3], 16000);
        let out = resample(&signal, 16000).unwrap();
        assert_eq!(out, signal);
    }

    #[test]
    fn test_downsample_halves_length() {
        let signal = Signal::new(vec![0.0; 32000], 32000);
        let out = resample(&signal, 16000).unwrap();
        assert_eq!(out.sample_rate(), 16000);
        // One second of audio stays one second long
        assert!(out.len() <= 16000);
        assert!(out.len() > 14000, "expected ~16000 samples, got {}", out.len());
    }

    #[test]
    fn test_empty_signal() {
        let signal = Signal::new(Vec::new(), 44100);
        let out = resample(&signal, 16000).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.sample_rate(), 16000);
    }
}
