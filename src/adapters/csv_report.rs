use std::path::Path;

use tracing::info;

use crate::domain::{BatchRecord, DomainError};

/// Write the batch report as CSV.
///
/// Any existing file at `path` is overwritten. The header is fixed
/// (`Track Number,File Name,Transcription`) and rows follow input order;
/// fields containing delimiters or quotes are quoted per RFC 4180.
pub fn write(path: &Path, records: &[BatchRecord]) -> Result<(), DomainError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| DomainError::FileAccess {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // Header is written unconditionally, even for an empty batch.
    writer.write_record(["Track Number", "File Name", "Transcription"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| DomainError::Io(e.to_string()))?;

    info!(path = %path.display(), rows = records.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<BatchRecord> {
        vec![
            BatchRecord::new(1, "a.wav", "plain text"),
            BatchRecord::new(2, "b.wav", "has, a comma"),
            BatchRecord::new(3, "c.wav", ""),
        ]
    }

    #[test]
    fn test_header_and_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write(&path, &records()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Track Number,File Name,Transcription"
        );
        assert!(lines.next().unwrap().starts_with("1,a.wav"));
        assert!(lines.next().unwrap().starts_with("2,b.wav"));
        assert!(lines.next().unwrap().starts_with("3,c.wav"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write(&path, &records()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"has, a comma\""));
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "stale contents\nmore stale\nmore\nmore\nmore\n").unwrap();

        write(&path, &records()[..1].to_vec()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 2); // header + one row
    }

    #[test]
    fn test_empty_batch_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "Track Number,File Name,Transcription");
    }
}
