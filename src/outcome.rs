//! Per-group outcome log.
//!
//! The pipeline reports every group it handles to an [`OutcomeLog`]: either
//! a forecast was produced or the group was skipped for lack of data. Lines
//! are free text meant for people, not parsers.

use crate::error::{ForecastError, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// What happened to a (vendor, region) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A forecast was fitted and merged.
    Forecasted,
    /// The group fell below the sufficiency threshold.
    InsufficientData,
}

impl Outcome {
    /// Human-readable status line for a group.
    pub fn describe(&self, vendor: &str, region: &str) -> String {
        match self {
            Outcome::Forecasted => {
                format!("Forecasted for Vendor: {vendor} in Geo-region:{region}")
            }
            Outcome::InsufficientData => {
                format!("Not enough data to forecast for Vendor: {vendor} in Geo-region:{region}")
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Forecasted => write!(f, "forecasted"),
            Outcome::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

/// Sink for per-group outcomes.
///
/// Implementations are shared across groups forecast in parallel and must
/// keep each record atomic.
pub trait OutcomeLog: Send + Sync {
    fn record(&self, outcome: Outcome, vendor: &str, region: &str) -> Result<()>;
}

/// Appends one line per outcome to a text file.
///
/// Appends are serialized through a mutex so lines from concurrent groups
/// never interleave.
#[derive(Debug)]
pub struct AppendFileLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AppendFileLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeLog for AppendFileLog {
    fn record(&self, outcome: Outcome, vendor: &str, region: &str) -> Result<()> {
        let line = outcome.describe(vendor, region);
        let mut file = self
            .file
            .lock()
            .map_err(|_| ForecastError::OutcomeLog("log file lock poisoned".to_string()))?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Keeps outcome lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl OutcomeLog for MemoryLog {
    fn record(&self, outcome: Outcome, vendor: &str, region: &str) -> Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| ForecastError::OutcomeLog("memory log lock poisoned".to_string()))?;
        lines.push(outcome.describe(vendor, region));
        Ok(())
    }
}

/// Discards every outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl OutcomeLog for NullLog {
    fn record(&self, _outcome: Outcome, _vendor: &str, _region: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn describe_names_vendor_and_region() {
        assert_eq!(
            Outcome::Forecasted.describe("Acme", "EMEA"),
            "Forecasted for Vendor: Acme in Geo-region:EMEA"
        );
        assert_eq!(
            Outcome::InsufficientData.describe("Acme", "EMEA"),
            "Not enough data to forecast for Vendor: Acme in Geo-region:EMEA"
        );
    }

    #[test]
    fn memory_log_keeps_order() {
        let log = MemoryLog::new();
        log.record(Outcome::InsufficientData, "A", "North").unwrap();
        log.record(Outcome::Forecasted, "B", "South").unwrap();

        assert_eq!(
            log.lines(),
            vec![
                "Not enough data to forecast for Vendor: A in Geo-region:North".to_string(),
                "Forecasted for Vendor: B in Geo-region:South".to_string(),
            ]
        );
    }

    #[test]
    fn file_log_appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "earlier run\n").unwrap();

        let log = AppendFileLog::open(&path).unwrap();
        log.record(Outcome::Forecasted, "Acme", "EMEA").unwrap();
        assert_eq!(log.path(), path.as_path());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "earlier run\nForecasted for Vendor: Acme in Geo-region:EMEA\n"
        );
    }

    #[test]
    fn file_log_lines_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let log = Arc::new(AppendFileLog::open(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for j in 0..25 {
                        let vendor = format!("vendor-{i}");
                        let region = format!("region-{j}");
                        log.record(Outcome::Forecasted, &vendor, &region).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 200);
        assert!(lines
            .iter()
            .all(|l| l.starts_with("Forecasted for Vendor: vendor-") && l.contains(" in Geo-region:region-")));
    }

    #[test]
    fn null_log_accepts_everything() {
        assert!(NullLog.record(Outcome::Forecasted, "x", "y").is_ok());
    }
}
