use anyhow::{anyhow, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes a rendered report to disk atomically, so readers never see a
/// half-written file.
pub struct ReportSink {
    path: PathBuf,
}

impl ReportSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, contents: &str) -> Result<()> {
        AtomicFile::new(&self.path, AllowOverwrite)
            .write(|f| f.write_all(contents.as_bytes()))
            .map_err(|e| anyhow!("Failed to write report {}: {}", self.path.display(), e))?;
        info!(path = %self.path.display(), bytes = contents.len(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ReportSink::new(dir.path().join("summary.json"));

        sink.write("{\"total_claims\": 1}").unwrap();
        sink.write("{\"total_claims\": 2}").unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(written, "{\"total_claims\": 2}");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ReportSink::new(dir.path().join("nope").join("summary.json"));
        assert!(sink.write("{}").is_err());
    }
}
