//! Log Line and File Name Formats

use crate::LogError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token written in place of a count when no reading was available
pub const MISSING_READING: &str = "ERROR";

/// Count field of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reading {
    /// Occupancy count
    Count(u32),
    /// No reading was taken
    Missing,
}

/// One `HH:MM, <count>` line of a day log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub hour: u8,
    pub minute: u8,
    pub reading: Reading,
}

impl FromStr for LogLine {
    type Err = LogError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut parts = line.split(',');
        let (time_str, count_str) = match (parts.next(), parts.next(), parts.next()) {
            (Some(time), Some(count), None) => (time.trim(), count),
            _ => return Err(LogError::MalformedLine(line.to_string())),
        };

        let time = NaiveTime::parse_from_str(time_str, "%H:%M").map_err(|e| {
            LogError::InvalidTime {
                value: time_str.to_string(),
                reason: e.to_string(),
            }
        })?;

        let reading = if count_str.contains(MISSING_READING) {
            Reading::Missing
        } else {
            let count = count_str
                .trim()
                .parse::<u32>()
                .map_err(|_| LogError::InvalidCount(count_str.trim().to_string()))?;
            Reading::Count(count)
        };

        Ok(Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            reading,
        })
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}, ", self.hour, self.minute)?;
        match self.reading {
            Reading::Count(count) => write!(f, "{}", count),
            Reading::Missing => f.write_str(MISSING_READING),
        }
    }
}

/// Parse the observation date from a `YYYY-MM-DD.txt` file name
pub fn parse_log_date(file_name: &str) -> Result<NaiveDate, LogError> {
    let stem = file_name
        .strip_suffix(".txt")
        .ok_or_else(|| LogError::InvalidFileDate(file_name.to_string()))?;

    NaiveDate::parse_from_str(stem, "%Y-%m-%d")
        .map_err(|_| LogError::InvalidFileDate(file_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_count_line() {
        let line: LogLine = "08:15, 42".parse().unwrap();
        assert_eq!(
            line,
            LogLine {
                hour: 8,
                minute: 15,
                reading: Reading::Count(42)
            }
        );
    }

    #[test]
    fn test_parse_missing_reading() {
        let line: LogLine = "09:00, ERROR".parse().unwrap();
        assert_eq!(line.reading, Reading::Missing);
        assert_eq!((line.hour, line.minute), (9, 0));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            "garbage".parse::<LogLine>(),
            Err(LogError::MalformedLine(_))
        ));
        assert!(matches!(
            "08:15, 4, 2".parse::<LogLine>(),
            Err(LogError::MalformedLine(_))
        ));
        assert!(matches!(
            "25:15, 42".parse::<LogLine>(),
            Err(LogError::InvalidTime { .. })
        ));
        assert!(matches!(
            "08:15, lots".parse::<LogLine>(),
            Err(LogError::InvalidCount(_))
        ));
        assert!(matches!(
            "08:15, -3".parse::<LogLine>(),
            Err(LogError::InvalidCount(_))
        ));
    }

    #[test]
    fn test_display_matches_log_format() {
        let line = LogLine {
            hour: 6,
            minute: 0,
            reading: Reading::Count(17),
        };
        assert_eq!(line.to_string(), "06:00, 17");

        let missing = LogLine {
            reading: Reading::Missing,
            ..line
        };
        assert_eq!(missing.to_string(), "06:00, ERROR");
        assert_eq!(missing.to_string().parse::<LogLine>().unwrap(), missing);
    }

    #[test]
    fn test_parse_log_date() {
        let date = parse_log_date("2024-01-08.txt").unwrap();
        assert_eq!(date.weekday().number_from_monday(), 1);

        assert!(parse_log_date("2024-13-08.txt").is_err());
        assert!(parse_log_date("notes.txt").is_err());
        assert!(parse_log_date("2024-01-08.csv").is_err());
    }
}
