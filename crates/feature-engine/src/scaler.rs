//! Z-Score Feature Scaling

use crate::features::{FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
use crate::matrix::FeatureMatrix;
use crate::statistics::ColumnStatistics;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Handling of training columns with zero standard deviation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Divide by 1 instead: the column centres to zero and carries no signal
    #[default]
    UnitScale,
    /// Fail the fit with `FeatureError::DegenerateFeature`
    Reject,
}

/// Per-column mean and standard deviation captured from a training matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatistics {
    mean: [f64; FEATURE_DIMENSION],
    std_dev: [f64; FEATURE_DIMENSION],
    degenerate: Vec<usize>,
}

impl FeatureStatistics {
    /// Column means
    pub fn mean(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.mean
    }

    /// Column divisors (population std, or 1 for degenerate columns)
    pub fn std_dev(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.std_dev
    }

    /// Indices of columns that were constant in the training set
    pub fn degenerate_columns(&self) -> &[usize] {
        &self.degenerate
    }

    /// `(x - mean) / std` for every row
    pub fn transform(&self, matrix: &FeatureMatrix) -> FeatureMatrix {
        matrix.map_columns(|j, x| (x - self.mean[j]) / self.std_dev[j])
    }

    /// Scale a single query vector with the training statistics
    pub fn transform_vector(&self, features: &FeatureVector) -> FeatureVector {
        let mut values = *features.values();
        for (j, x) in values.iter_mut().enumerate() {
            *x = (*x - self.mean[j]) / self.std_dev[j];
        }
        FeatureVector::from_values(values)
    }

    /// `x * std + mean` for every row
    pub fn inverse_transform(&self, matrix: &FeatureMatrix) -> FeatureMatrix {
        matrix.map_columns(|j, x| x * self.std_dev[j] + self.mean[j])
    }
}

/// Z-score scaler
#[derive(Debug, Clone, Copy, Default)]
pub struct Scaler {
    policy: DegeneratePolicy,
}

impl Scaler {
    /// Create a scaler with the given degenerate-column policy
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    /// Compute column-wise mean and population standard deviation
    pub fn fit(&self, matrix: &FeatureMatrix) -> Result<FeatureStatistics, FeatureError> {
        if matrix.is_empty() {
            return Err(FeatureError::EmptyMatrix);
        }

        let mut mean = [0.0; FEATURE_DIMENSION];
        let mut std_dev = [0.0; FEATURE_DIMENSION];
        let mut degenerate = Vec::new();

        for j in 0..FEATURE_DIMENSION {
            let stats = ColumnStatistics::compute(matrix.column(j));
            mean[j] = stats.mean;

            if stats.is_degenerate() {
                match self.policy {
                    DegeneratePolicy::Reject => {
                        return Err(FeatureError::DegenerateFeature {
                            index: j,
                            name: FEATURE_NAMES[j],
                        });
                    }
                    DegeneratePolicy::UnitScale => {
                        warn!(
                            "Feature {} is constant ({}), scaling by 1",
                            FEATURE_NAMES[j], stats.mean
                        );
                        std_dev[j] = 1.0;
                        degenerate.push(j);
                    }
                }
            } else {
                std_dev[j] = stats.std_dev;
            }
        }

        debug!(
            "Fitted scaler on {} rows ({} degenerate columns)",
            matrix.nrows(),
            degenerate.len()
        );

        Ok(FeatureStatistics {
            mean,
            std_dev,
            degenerate,
        })
    }
}
