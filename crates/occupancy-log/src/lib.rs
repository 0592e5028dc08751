//! Occupancy Log Reader
//!
//! Reads per-day log files (`YYYY-MM-DD.txt`, one `HH:MM, <count>` line per
//! reading) into training observations. Malformed files and lines are skipped
//! with a warning; only failure to read the log directory itself is fatal.

mod loader;
mod record;

pub use loader::{LoadReport, LogLoader, LOG_EXTENSION};
pub use record::{parse_log_date, LogLine, Reading, MISSING_READING};

use std::path::PathBuf;
use thiserror::Error;

/// Log reading errors
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid date in file name {0:?}, expected YYYY-MM-DD.txt")]
    InvalidFileDate(String),
    #[error("Malformed line {0:?}, expected `HH:MM, <count>`")]
    MalformedLine(String),
    #[error("Invalid time {value:?}: {reason}")]
    InvalidTime { value: String, reason: String },
    #[error("Invalid count {0:?}")]
    InvalidCount(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Whether the error only affects a single file or line
    pub fn is_malformed_record(&self) -> bool {
        !matches!(self, LogError::Io { .. })
    }
}
