pub mod preemphasis;
pub mod resample;
pub mod spectrogram;

pub use preemphasis::preemphasis;
pub use resample::resample;
pub use spectrogram::{compute_spectrogram, Spectrogram, DEFAULT_HOP_SIZE, DEFAULT_WINDOW_SIZE};
