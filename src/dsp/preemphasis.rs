use crate::domain::{DomainError, Signal};

/// First-order pre-emphasis filter: `y[i] = x[i] - coefficient * x[i-1]`.
///
/// `x[-1]` is treated as zero, so the first sample passes through unchanged.
/// Output length and sample rate match the input; a coefficient of 0 is the
/// identity.
pub fn preemphasis(signal: &Signal, coefficient: f32) -> Result<Signal, DomainError> {
    if !(0.0..1.0).contains(&coefficient) {
        return Err(DomainError::Audio(format!(
            "pre-emphasis coefficient must be in [0, 1), got {}",
            coefficient
        )));
    }

    let samples = signal.samples();
    let mut filtered = Vec::with_capacity(samples.len());
    let mut previous = 0.0f32;
    for &sample in samples {
        filtered.push(sample - coefficient * previous);
        previous = sample;
    }

    Ok(Signal::new(filtered, signal.sample_rate()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_length_is_preserved() {
        let signal = Signal::new(vec![0.1, 0.2, 0.3, 0.4, 0.5], 8000);
        let filtered = preemphasis(&signal, 0.97).unwrap();
        assert_eq!(filtered.len(), signal.len());
        assert_eq!(filtered.sample_rate(), 8000);
    }

    #[test]
    fn test_zero_coefficient_is_identity() {
        let signal = Signal::new(vec![0.5, -0.25, 0.125], 16000);
        let filtered = preemphasis(&signal, 0.0).unwrap();
        assert_eq!(filtered.samples(), signal.samples());
    }

    #[test]
    fn test_filter_formula() {
        let signal = Signal::new(vec![1.0, 1.0, 1.0], 16000);
        let filtered = preemphasis(&signal, 0.5).unwrap();
        assert_relative_eq!(filtered.samples()[0], 1.0);
        assert_relative_eq!(filtered.samples()[1], 0.5);
        assert_relative_eq!(filtered.samples()[2], 0.5);
    }

    #[test]
    fn test_empty_input() {
        let signal = Signal::new(Vec::new(), 16000);
        let filtered = preemphasis(&signal, 0.97).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_out_of_range_coefficient() {
        let signal = Signal::new(vec![0.1], 16000);
        assert!(preemphasis(&signal, 1.0).is_err());
        assert!(preemphasis(&signal, -0.1).is_err());
    }
}
