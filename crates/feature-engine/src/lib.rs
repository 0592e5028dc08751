//! Feature Engineering Engine
//!
//! Expands a time of week into a fixed 17-dimensional polynomial/cyclical
//! feature vector and standardizes features with statistics captured from
//! the training set.

mod features;
mod matrix;
mod scaler;
mod statistics;

pub use features::{FeatureExtractor, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
pub use matrix::FeatureMatrix;
pub use scaler::{DegeneratePolicy, FeatureStatistics, Scaler};
pub use statistics::ColumnStatistics;

use thiserror::Error;

/// Errors during feature construction and scaling
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Feature matrix has no rows")]
    EmptyMatrix,
    #[error("Dimension mismatch: expected {expected} columns, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Feature {index} ({name}) has zero standard deviation")]
    DegenerateFeature { index: usize, name: &'static str },
}
