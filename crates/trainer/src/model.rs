//! Fitted Linear Model

use feature_engine::{FeatureMatrix, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weights over scaled features plus an unregularized bias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    weights: [f64; FEATURE_DIMENSION],
    bias: f64,
}

impl LinearModel {
    /// Create a model from weights and bias
    pub fn new(weights: [f64; FEATURE_DIMENSION], bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Weights in `FEATURE_NAMES` order
    pub fn weights(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.weights
    }

    /// Bias term
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Raw (unclamped) output for one scaled feature vector
    pub fn predict(&self, scaled: &FeatureVector) -> f64 {
        scaled.dot(&self.weights) + self.bias
    }

    /// Raw (unclamped) outputs for every row of a scaled matrix
    pub fn predict_matrix(&self, scaled: &FeatureMatrix) -> Array1<f64> {
        scaled.mat_vec(&self.weights) + self.bias
    }

    /// `w0*dow + w1*hour + ... + bias`, two decimals per coefficient
    pub fn equation(&self) -> String {
        let terms: Vec<String> = self
            .weights
            .iter()
            .zip(FEATURE_NAMES.iter())
            .map(|(w, name)| format!("{:.2}*{}", w, name))
            .collect();
        format!("{} + {:.2}", terms.join(" + "), self.bias)
    }
}

impl fmt::Display for LinearModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {}", self.equation())
    }
}
