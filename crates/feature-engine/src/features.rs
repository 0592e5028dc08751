//! Feature Vector Assembly

use crate::matrix::FeatureMatrix;
use data_validator::TimeOfWeek;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Number of engineered features
pub const FEATURE_DIMENSION: usize = 17;

/// Feature names in vector order, as rendered in the model equation
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "dow",
    "hour",
    "minute",
    "sin(dow_norm)",
    "cos(dow_norm)",
    "sin(minute_norm)",
    "cos(minute_norm)",
    "dow**2",
    "hour**2",
    "minute**2",
    "hour**3",
    "minute**3",
    "dow*(hour**2)",
    "(dow * hour)",
    "(dow * minute)",
    "(hour * minute)",
    "is_weekend",
];

/// Engineered features for one time of week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Wrap raw feature values (already in `FEATURE_NAMES` order)
    pub fn from_values(values: [f64; FEATURE_DIMENSION]) -> Self {
        Self { values }
    }

    /// Feature values in `FEATURE_NAMES` order
    pub fn values(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.values
    }

    /// Look up a feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// Weekend indicator, exactly 0.0 or 1.0
    pub fn is_weekend(&self) -> f64 {
        self.values[FEATURE_DIMENSION - 1]
    }

    /// Dot product with a weight vector
    pub fn dot(&self, weights: &[f64; FEATURE_DIMENSION]) -> f64 {
        self.values
            .iter()
            .zip(weights.iter())
            .map(|(x, w)| x * w)
            .sum()
    }
}

/// Feature extractor for time-of-week inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new() -> Self {
        Self
    }

    /// Expand a time of week into its feature vector
    pub fn extract(&self, time: &TimeOfWeek) -> FeatureVector {
        let dow = time.dow() as f64;
        let hour = time.hour() as f64;
        let minute = time.minute() as f64;
        let is_weekend = if time.is_weekend() { 1.0 } else { 0.0 };

        let minute_norm = (time.minute_of_day() as f64 / (24.0 * 60.0)) * 2.0 * PI;
        let dow_norm = (dow / 7.0) * 2.0 * PI;

        FeatureVector::from_values([
            dow,
            hour,
            minute,
            dow_norm.sin(),
            dow_norm.cos(),
            minute_norm.sin(),
            minute_norm.cos(),
            dow * dow,
            hour * hour,
            minute * minute,
            hour * hour * hour,
            minute * minute * minute,
            dow * (hour * hour),
            dow * hour,
            dow * minute,
            hour * minute,
            is_weekend,
        ])
    }

    /// Build the raw feature matrix for a set of times, one row per time
    pub fn extract_matrix<'a, I>(&self, times: I) -> FeatureMatrix
    where
        I: IntoIterator<Item = &'a TimeOfWeek>,
    {
        let rows: Vec<FeatureVector> = times.into_iter().map(|t| self.extract(t)).collect();
        debug!("Extracted features for {} rows", rows.len());
        FeatureMatrix::from_rows(&rows)
    }
}
