use anyhow::{Context, Result};
use claimcheck_core::Record;
use claimcheck_report::SkippedRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A materialized batch: valid records plus the lines that were skipped
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRecord>,
}

/// JSON Lines batch source, one record per line
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file. Malformed lines are skipped, I/O errors abort.
    pub fn read(&self) -> Result<Batch> {
        let file = File::open(&self.path)
            .with_context(|| format!("failed to open batch file {}", self.path.display()))?;
        let batch = Self::read_from(BufReader::new(file))
            .with_context(|| format!("failed to read batch file {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            records = batch.records.len(),
            skipped = batch.skipped.len(),
            "batch loaded"
        );
        Ok(batch)
    }

    pub fn read_from<R: BufRead>(reader: R) -> Result<Batch> {
        let mut batch = Batch::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match Record::from_json_line(line_no, &line) {
                Ok(record) => batch.records.push(record),
                Err(err) => {
                    warn!(line = line_no, error = %err, "skipping malformed record");
                    batch.skipped.push(SkippedRecord::from_error(line_no, &err));
                }
            }
        }

        Ok(batch)
    }
}
