use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::OutputRecord;

/// Appends records to the output one line at a time.
///
/// Each record is flushed as soon as it is written so a run that dies
/// halfway still leaves every finished line on disk.
pub struct RecordWriter<W: Write> {
    inner: W,
}

impl RecordWriter<BufWriter<File>> {
    /// Create (or truncate) the output file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record(&mut self, record: &OutputRecord) -> std::io::Result<()> {
        writeln!(self.inner, "{}", record)?;
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LatLng;
    use std::fs;
    use tempfile::tempdir;

    fn record(address: &str, lat: f64, lng: f64) -> OutputRecord {
        OutputRecord {
            address: address.to_string(),
            location: LatLng::new(lat, lng),
            located: true,
        }
    }

    #[test]
    fn test_lines_are_newline_terminated() {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_record(&record("Beijing", 39.9, 116.4)).unwrap();
        writer.write_record(&record("Nowhere", 0.0, 0.0)).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "\"Beijing\",39.900000,116.400000\n\"Nowhere\",0.000000,0.000000\n"
        );
    }

    #[test]
    fn test_create_truncates_and_streams() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale contents\n").unwrap();

        let mut writer = RecordWriter::create(&path).unwrap();
        writer.write_record(&record("Tokyo", 35.6762, 139.6503)).unwrap();

        // Visible before the writer is dropped
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\"Tokyo\",35.676200,139.650300\n"
        );
    }

    #[test]
    fn test_create_fails_in_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");
        assert!(RecordWriter::create(&path).is_err());
    }
}
