//! Waveform and spectrogram rendering.
//!
//! Presentation-only output: plots are rasterized straight into PNG files,
//! one pixel column per slice of the signal.

use std::path::Path;

use image::{Rgb, RgbImage};
use tracing::info;

use crate::domain::{DomainError, Signal};
use crate::dsp::Spectrogram;

const WAVEFORM_WIDTH: u32 = 1200;
const WAVEFORM_HEIGHT: u32 = 400;
const SPECTROGRAM_MAX_WIDTH: usize = 1600;
const SPECTROGRAM_HEIGHT: u32 = 400;

const BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);
const WAVEFORM_COLOR: Rgb<u8> = Rgb([31, 119, 180]);
const CENTERLINE_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

/// Render a min/max waveform plot of the signal.
pub fn render_waveform(signal: &Signal, path: &Path) -> Result<(), DomainError> {
    if signal.is_empty() {
        return Err(DomainError::Render(
            "cannot plot an empty signal".to_string(),
        ));
    }

    let width = WAVEFORM_WIDTH;
    let height = WAVEFORM_HEIGHT;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    for x in 0..width {
        img.put_pixel(x, height / 2, CENTERLINE_COLOR);
    }

    let samples = signal.samples();
    let peak = samples
        .iter()
        .map(|s| s.abs())
        .fold(f32::MIN, f32::max)
        .max(1e-6);

    let per_column = (samples.len() as f32 / width as f32).max(1.0);
    for x in 0..width {
        let begin = (x as f32 * per_column) as usize;
        let end = (((x + 1) as f32 * per_column) as usize).min(samples.len());
        if begin >= end {
            continue;
        }

        let slice = &samples[begin..end];
        let lo = slice.iter().cloned().fold(f32::MAX, f32::min) / peak;
        let hi = slice.iter().cloned().fold(f32::MIN, f32::max) / peak;

        let y_hi = amplitude_to_row(hi, height);
        let y_lo = amplitude_to_row(lo, height);
        for y in y_hi..=y_lo {
            img.put_pixel(x, y, WAVEFORM_COLOR);
        }
    }

    img.save(path)
        .map_err(|e| DomainError::Render(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Waveform rendered");
    Ok(())
}

/// Map an amplitude in [-1, 1] to an image row (top = +1).
fn amplitude_to_row(amplitude: f32, height: u32) -> u32 {
    let clamped = amplitude.clamp(-1.0, 1.0);
    let row = ((1.0 - clamped) * 0.5 * (height - 1) as f32).round() as u32;
    row.min(height - 1)
}

/// Render a spectrogram heatmap, low frequencies at the bottom.
pub fn render_spectrogram(spectrogram: &Spectrogram, path: &Path) -> Result<(), DomainError> {
    if spectrogram.frames.is_empty() {
        return Err(DomainError::Render(
            "signal shorter than one analysis window".to_string(),
        ));
    }

    let num_frames = spectrogram.num_frames();
    let step = num_frames.div_ceil(SPECTROGRAM_MAX_WIDTH);
    let width = num_frames.div_ceil(step) as u32;
    let height = SPECTROGRAM_HEIGHT;

    let mut img = RgbImage::new(width, height);
    for x in 0..width {
        let frame = &spectrogram.frames[(x as usize * step).min(num_frames - 1)];
        for y in 0..height {
            // Row 0 is the top of the image; highest bin first.
            let bin = ((height - 1 - y) as f32 / (height - 1) as f32
                * (spectrogram.bins - 1) as f32) as usize;
            let db = frame[bin];
            let t = ((db + 80.0) / 80.0).clamp(0.0, 1.0);
            img.put_pixel(x, y, colormap(t));
        }
    }

    img.save(path)
        .map_err(|e| DomainError::Render(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), frames = num_frames, "Spectrogram rendered");
    Ok(())
}

/// Dark-to-bright heatmap gradient for normalized level `t` in [0, 1].
fn colormap(t: f32) -> Rgb<u8> {
    const STOPS: [[f32; 3]; 5] = [
        [0.0, 0.0, 4.0],
        [87.0, 16.0, 110.0],
        [188.0, 55.0, 84.0],
        [249.0, 142.0, 9.0],
        [252.0, 255.0, 164.0],
    ];

    let scaled = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f32;
    let idx = (scaled as usize).min(STOPS.len() - 2);
    let frac = scaled - idx as f32;

    let mut rgb = [0u8; 3];
    for (c, slot) in rgb.iter_mut().enumerate() {
        *slot = (STOPS[idx][c] + (STOPS[idx + 1][c] - STOPS[idx][c]) * frac).round() as u8;
    }
    Rgb(rgb)
}
