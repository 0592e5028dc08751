//! Range Validator for Time-of-Week Fields

use crate::error::ValidationError;

/// Day of week, 1 = Monday ... 7 = Sunday
pub const DOW_RANGE: (i64, i64) = (1, 7);
/// Hour of day
pub const HOUR_RANGE: (i64, i64) = (0, 23);
/// Minute of hour
pub const MINUTE_RANGE: (i64, i64) = (0, 59);

/// Validator for raw time-of-week fields
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a single value against an inclusive range within `u8`
    pub fn validate_range(
        &self,
        field: &'static str,
        value: i64,
        range: (i64, i64),
    ) -> Result<u8, ValidationError> {
        let out_of_range = || ValidationError::OutOfRange {
            field,
            value,
            min: range.0,
            max: range.1,
        };

        if value < range.0 || value > range.1 {
            return Err(out_of_range());
        }
        u8::try_from(value).map_err(|_| out_of_range())
    }

    /// Validate day of week
    pub fn validate_dow(&self, dow: i64) -> Result<u8, ValidationError> {
        self.validate_range("dow", dow, DOW_RANGE)
    }

    /// Validate hour
    pub fn validate_hour(&self, hour: i64) -> Result<u8, ValidationError> {
        self.validate_range("hour", hour, HOUR_RANGE)
    }

    /// Validate minute
    pub fn validate_minute(&self, minute: i64) -> Result<u8, ValidationError> {
        self.validate_range("minute", minute, MINUTE_RANGE)
    }

    /// Parse a textual field as an integer
    pub fn parse_integer(&self, field: &'static str, raw: &str) -> Result<i64, ValidationError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NotAnInteger {
                field,
                value: raw.to_string(),
            })
    }
}
