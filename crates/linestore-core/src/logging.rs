//! Timestamped activity log
//!
//! Append-only log file writer consumed by the surrounding application.
//! Every line is prefixed with a local timestamp; the target file and its
//! parent directories are created on first write.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::error::{StoreError, StoreResult};

/// Timestamp format for log lines
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends timestamped lines to a log file.
#[derive(Debug, Clone)]
pub struct LogWriter {
    path: PathBuf,
}

impl LogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one timestamped line.
    pub fn write(&self, line: &str) -> StoreResult<()> {
        self.write_all([line])
    }

    /// Append several timestamped lines in one open/write cycle.
    pub fn write_all<I, S>(&self, lines: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(e, parent))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(e, &self.path))?;

        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        for line in lines {
            writeln!(file, "{} {}", stamp, line.as_ref())
                .map_err(|e| StoreError::io(e, &self.path))?;
        }
        Ok(())
    }
}
