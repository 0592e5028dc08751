//! Validated Time-of-Week Inputs

use crate::error::ValidationError;
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A validated point in the week: `dow` in 1..=7 (Monday = 1), `hour` in
/// 0..=23, `minute` in 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfWeek")]
pub struct TimeOfWeek {
    dow: u8,
    hour: u8,
    minute: u8,
}

impl TimeOfWeek {
    /// Create a time of week, rejecting out-of-range fields
    pub fn new(dow: i64, hour: i64, minute: i64) -> Result<Self, ValidationError> {
        let validator = Validator::new();
        Ok(Self {
            dow: validator.validate_dow(dow)?,
            hour: validator.validate_hour(hour)?,
            minute: validator.validate_minute(minute)?,
        })
    }

    /// Parse textual request fields; non-integer and out-of-range values are rejected
    pub fn parse_fields(dow: &str, hour: &str, minute: &str) -> Result<Self, ValidationError> {
        let validator = Validator::new();
        let dow = validator.parse_integer("dow", dow)?;
        let hour = validator.parse_integer("hour", hour)?;
        let minute = validator.parse_integer("minute", minute)?;

        Self::new(dow, hour, minute).inspect_err(|e| {
            debug!("Rejected time-of-week fields: {}", e);
        })
    }

    /// Day of week (1 = Monday ... 7 = Sunday)
    pub fn dow(&self) -> u8 {
        self.dow
    }

    /// Hour of day
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of hour
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        self.dow >= 6
    }
}

#[derive(Deserialize)]
struct RawTimeOfWeek {
    dow: i64,
    hour: i64,
    minute: i64,
}

impl TryFrom<RawTimeOfWeek> for TimeOfWeek {
    type Error = ValidationError;

    fn try_from(raw: RawTimeOfWeek) -> Result<Self, Self::Error> {
        Self::new(raw.dow, raw.hour, raw.minute)
    }
}

impl fmt::Display for TimeOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}, {:02}:{:02}", self.dow, self.hour, self.minute)
    }
}

/// A single occupancy reading at a time of week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub time: TimeOfWeek,
    pub count: u32,
}

impl Observation {
    /// Create a new observation
    pub fn new(time: TimeOfWeek, count: u32) -> Self {
        Self { time, count }
    }
}
