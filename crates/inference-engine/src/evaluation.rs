//! In-Sample Fit Evaluation

use crate::predictor::Predictor;
use crate::InferenceError;
use data_validator::{Observation, TimeOfWeek};
use serde::Serialize;

/// Fit quality of raw (unclamped) predictions against observed counts
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Number of observations
    pub n_samples: usize,
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// `actual - predicted`, in observation order
    pub residuals: Vec<f64>,
}

impl Evaluation {
    /// Evaluate a predictor over observations
    pub fn compute(predictor: &Predictor, observations: &[Observation]) -> Result<Self, InferenceError> {
        if observations.is_empty() {
            return Err(InferenceError::NoObservations);
        }

        let times: Vec<TimeOfWeek> = observations.iter().map(|o| o.time).collect();
        let predicted = predictor.predict_batch(&times).to_vec();
        let actual: Vec<f64> = observations.iter().map(|o| o.count as f64).collect();

        Self::from_predictions(&actual, &predicted)
    }

    /// Metrics from paired actual and predicted values
    pub fn from_predictions(actual: &[f64], predicted: &[f64]) -> Result<Self, InferenceError> {
        if actual.len() != predicted.len() {
            return Err(InferenceError::LengthMismatch {
                actual: actual.len(),
                predicted: predicted.len(),
            });
        }

        let n = actual.len();
        let residuals: Vec<f64> = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| a - p)
            .collect();

        if n == 0 {
            return Ok(Self {
                n_samples: 0,
                mse: 0.0,
                rmse: 0.0,
                mae: 0.0,
                r_squared: 0.0,
                residuals,
            });
        }

        let n_f = n as f64;
        let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
        let mse = ss_res / n_f;
        let mae = residuals.iter().map(|r| r.abs()).sum::<f64>() / n_f;

        let mean = actual.iter().sum::<f64>() / n_f;
        let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
        // Constant targets: perfect fit scores 1, anything else 0
        let r_squared = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Ok(Self {
            n_samples: n,
            mse,
            rmse: mse.sqrt(),
            mae,
            r_squared,
            residuals,
        })
    }
}
