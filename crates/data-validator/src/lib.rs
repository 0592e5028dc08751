//! Data Validation
//!
//! Provides range checking and integer-field parsing for the time-of-week
//! inputs that feed feature engineering and prediction.

mod error;
mod time;
mod validator;

pub use error::ValidationError;
pub use time::{Observation, TimeOfWeek};
pub use validator::{Validator, DOW_RANGE, HOUR_RANGE, MINUTE_RANGE};
