use serde::{Deserialize, Serialize};

/// One row of the batch transcription report.
///
/// Track numbers are assigned over the final collected sequence, 1-based and
/// contiguous; they are not derived from directory enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchRecord {
    #[serde(rename = "Track Number")]
    pub track: u32,
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Transcription")]
    pub transcription: String,
}

impl BatchRecord {
    pub fn new(track: u32, file_name: impl Into<String>, transcription: impl Into<String>) -> Self {
        Self {
            track,
            file_name: file_name.into(),
            transcription: transcription.into(),
        }
    }
}

/// Renumber records 1..N in their current order.
pub fn assign_track_numbers(records: &mut [BatchRecord]) {
    for (idx, record) in records.iter_mut().enumerate() {
        record.track = (idx + 1) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_numbers_are_contiguous() {
        let mut records = vec![
            BatchRecord::new(0, "b.wav", "beta"),
            BatchRecord::new(0, "a.wav", "alpha"),
            BatchRecord::new(0, "c.wav", ""),
        ];
        assign_track_numbers(&mut records);

        let tracks: Vec<u32> = records.iter().map(|r| r.track).collect();
        assert_eq!(tracks, vec![1, 2, 3]);
        // Ordering is preserved, only numbering changes
        assert_eq!(records[0].file_name, "b.wav");
    }
}
