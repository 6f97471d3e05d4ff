//! Short-time Fourier transform for spectrogram rendering.

use realfft::RealFftPlanner;

use crate::domain::{DomainError, Signal};

/// Analysis window size in samples.
pub const DEFAULT_WINDOW_SIZE: usize = 1024;
/// Hop between consecutive frames in samples.
pub const DEFAULT_HOP_SIZE: usize = 256;

const DB_FLOOR: f32 = -80.0;

/// Time-frequency magnitude representation of a signal.
///
/// `frames[t][k]` is the level of frequency bin `k` in frame `t`, in dB
/// relative to the loudest bin of the whole signal, clamped to [-80, 0].
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Vec<f32>>,
    pub bins: usize,
    pub sample_rate: u32,
    pub hop_size: usize,
}

impl Spectrogram {
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

/// Hann window coefficients.
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos()))
        .collect()
}

/// Compute a log-magnitude spectrogram with a Hann-windowed real FFT.
///
/// Signals shorter than one window produce an empty spectrogram; otherwise
/// the frame count is `1 + (len - window_size) / hop_size`.
pub fn compute_spectrogram(
    signal: &Signal,
    window_size: usize,
    hop_size: usize,
) -> Result<Spectrogram, DomainError> {
    if window_size == 0 || hop_size == 0 {
        return Err(DomainError::Audio(
            "spectrogram window and hop sizes must be positive".to_string(),
        ));
    }

    let bins = window_size / 2 + 1;
    let samples = signal.samples();

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(window_size);
    let window = hann_window(window_size);

    let mut input = fft.make_input_vec();
    let mut output = fft.make_output_vec();

    let mut power_frames: Vec<Vec<f32>> = Vec::new();
    let mut start = 0;
    while start + window_size <= samples.len() {
        for (i, slot) in input.iter_mut().enumerate() {
            *slot = samples[start + i] * window[i];
        }
        fft.process(&mut input, &mut output)
            .map_err(|e| DomainError::Audio(format!("FFT processing failed: {:?}", e)))?;
        power_frames.push(output.iter().map(|c| c.norm_sqr()).collect());
        start += hop_size;
    }

    // Convert to dB relative to the global maximum.
    let max_power = power_frames
        .iter()
        .flatten()
        .cloned()
        .fold(f32::MIN, f32::max)
        .max(1e-10);

    let frames = power_frames
        .into_iter()
        .map(|frame| {
            frame
                .into_iter()
                .map(|p| (10.0 * (p.max(1e-10) / max_power).log10()).max(DB_FLOOR))
                .collect()
        })
        .collect();

    Ok(Spectrogram {
        frames,
        bins,
        sample_rate: signal.sample_rate(),
        hop_size,
    })
}
