//! Day Log Loader

use crate::record::{parse_log_date, LogLine, Reading};
use crate::LogError;
use chrono::{Datelike, NaiveDate};
use data_validator::{Observation, TimeOfWeek};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of day log files
pub const LOG_EXTENSION: &str = "txt";

/// Observations read from a log directory plus bookkeeping on what was skipped
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Parsed observations, in file-name then line order
    pub observations: Vec<Observation>,
    /// Files parsed
    pub files_read: usize,
    /// Files skipped (bad file name or unreadable)
    pub files_skipped: usize,
    /// Lines skipped as malformed
    pub lines_skipped: usize,
    /// `ERROR` readings
    pub missing_readings: usize,
}

/// Loader for a directory of day logs
#[derive(Debug, Clone, Default)]
pub struct LogLoader;

impl LogLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self
    }

    /// Load every `*.txt` day log in `dir`, sorted by file name
    pub fn load_dir(&self, dir: &Path) -> Result<LoadReport, LogError> {
        let io_err = |source| LogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == LOG_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut report = LoadReport::default();
        for path in &paths {
            if let Err(e) = self.load_file(path, &mut report) {
                warn!("Skipping {}: {}", path.display(), e);
                report.files_skipped += 1;
            }
        }

        info!(
            "Loaded {} observations from {} files ({} files skipped, {} lines skipped, {} missing readings)",
            report.observations.len(),
            report.files_read,
            report.files_skipped,
            report.lines_skipped,
            report.missing_readings
        );

        Ok(report)
    }

    /// Load a single day log into `report`
    pub fn load_file(&self, path: &Path, report: &mut LoadReport) -> Result<(), LogError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LogError::InvalidFileDate(path.display().to_string()))?;
        let date = parse_log_date(file_name)?;

        let contents = std::fs::read_to_string(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_day(date, &contents, file_name, report);
        report.files_read += 1;
        Ok(())
    }

    /// Parse the contents of one day log; malformed lines are skipped
    pub fn parse_day(&self, date: NaiveDate, contents: &str, source: &str, report: &mut LoadReport) {
        let dow = date.weekday().number_from_monday() as i64;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Self::parse_observation(dow, line) {
                Ok(Some(observation)) => report.observations.push(observation),
                Ok(None) => {
                    debug!("No reading in {}: {}", source, line);
                    report.missing_readings += 1;
                }
                Err(e) => {
                    warn!("Skipping line in {}: {} -> {}", source, line, e);
                    report.lines_skipped += 1;
                }
            }
        }
    }

    fn parse_observation(dow: i64, line: &str) -> Result<Option<Observation>, LogError> {
        let parsed: LogLine = line.parse()?;
        match parsed.reading {
            Reading::Count(count) => {
                let time = TimeOfWeek::new(dow, parsed.hour as i64, parsed.minute as i64)
                    .map_err(|e| LogError::InvalidTime {
                        value: format!("{:02}:{:02}", parsed.hour, parsed.minute),
                        reason: e.to_string(),
                    })?;
                Ok(Some(Observation::new(time, count)))
            }
            Reading::Missing => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    #[test]
    fn test_parse_day() {
        let loader = LogLoader::new();
        let mut report = LoadReport::default();
        loader.parse_day(
            monday(),
            "08:15, 42\n09:00, ERROR\ngarbage\n\n",
            "2024-01-08.txt",
            &mut report,
        );

        assert_eq!(report.observations.len(), 1);
        let obs = report.observations[0];
        assert_eq!(obs.time, TimeOfWeek::new(1, 8, 15).unwrap());
        assert_eq!(obs.count, 42);
        assert_eq!(report.missing_readings, 1);
        assert_eq!(report.lines_skipped, 1);
    }

    #[test]
    fn test_out_of_range_time_is_skipped() {
        let loader = LogLoader::new();
        let mut report = LoadReport::default();
        loader.parse_day(monday(), "24:00, 3\n07:60, 4\n23:59, 5\n", "2024-01-08.txt", &mut report);

        assert_eq!(report.lines_skipped, 2);
        assert_eq!(report.observations.len(), 1);
        assert_eq!(report.observations[0].time, TimeOfWeek::new(1, 23, 59).unwrap());
        assert!(matches!(
            "24:00, 3".parse::<LogLine>(),
            Err(LogError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2024-01-08.txt"), "08:15, 42\n09:00, ERROR\n").unwrap();
        // Saturday
        fs::write(dir.path().join("2024-01-13.txt"), "10:30, 7\ngarbage\n").unwrap();
        fs::write(dir.path().join("not-a-date.txt"), "10:30, 7\n").unwrap();
        fs::write(dir.path().join("README.md"), "ignored").unwrap();

        let report = LogLoader::new().load_dir(dir.path()).unwrap();

        assert_eq!(report.files_read, 2);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.lines_skipped, 1);
        assert_eq!(report.missing_readings, 1);

        let observations = &report.observations;
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].time, TimeOfWeek::new(1, 8, 15).unwrap());
        assert_eq!(observations[1].time, TimeOfWeek::new(6, 10, 30).unwrap());
        assert!(observations[1].time.is_weekend());
        assert_eq!(observations[1].count, 7);
    }

    #[test]
    fn test_load_dir_is_ordered_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2024-01-10.txt"), "07:00, 3\n").unwrap();
        fs::write(dir.path().join("2024-01-09.txt"), "07:00, 2\n").unwrap();

        let report = LogLoader::new().load_dir(dir.path()).unwrap();
        let counts: Vec<u32> = report.observations.iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![2, 3]);
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = LogLoader::new()
            .load_dir(&dir.path().join("absent"))
            .unwrap_err();
        assert!(!err.is_malformed_record());
    }
}
