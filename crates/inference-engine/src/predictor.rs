//! Occupancy Predictor

use crate::InferenceError;
use data_validator::TimeOfWeek;
use feature_engine::{FeatureExtractor, FeatureStatistics};
use ndarray::Array1;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use trainer::LinearModel;

/// Predicted occupancy for one time of week
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Queried time
    pub time: TimeOfWeek,
    /// Unclamped model output
    pub raw: f64,
    /// Raw output clamped at zero and truncated
    pub occupancy: u32,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Predicted occupancy at {} -> {} people",
            self.time, self.occupancy
        )
    }
}

/// Clamp a raw model output to a non-negative whole count
pub fn clamp_occupancy(raw: f64) -> u32 {
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        // `as` saturates above u32::MAX
        raw.trunc() as u32
    }
}

/// Fitted model plus the training-set scaling statistics
#[derive(Debug, Clone)]
pub struct Predictor {
    extractor: FeatureExtractor,
    statistics: FeatureStatistics,
    model: LinearModel,
}

impl Predictor {
    /// Create a predictor from training statistics and a fitted model
    pub fn new(statistics: FeatureStatistics, model: LinearModel) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            statistics,
            model,
        }
    }

    /// Scaling statistics captured at training time
    pub fn statistics(&self) -> &FeatureStatistics {
        &self.statistics
    }

    /// Fitted model
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Unclamped model output for a time of week
    pub fn predict_raw(&self, time: &TimeOfWeek) -> f64 {
        let features = self.extractor.extract(time);
        let scaled = self.statistics.transform_vector(&features);
        self.model.predict(&scaled)
    }

    /// Non-negative occupancy estimate for a time of week
    pub fn predict(&self, time: TimeOfWeek) -> Prediction {
        let raw = self.predict_raw(&time);
        let occupancy = clamp_occupancy(raw);
        debug!("Prediction for {}: raw={:.4}, occupancy={}", time, raw, occupancy);

        Prediction {
            time,
            raw,
            occupancy,
        }
    }

    /// Predict from textual request fields
    pub fn predict_fields(
        &self,
        dow: &str,
        hour: &str,
        minute: &str,
    ) -> Result<Prediction, InferenceError> {
        let time = TimeOfWeek::parse_fields(dow, hour, minute)?;
        Ok(self.predict(time))
    }

    /// Unclamped outputs for many times, scaled as one batch
    pub fn predict_batch(&self, times: &[TimeOfWeek]) -> Array1<f64> {
        let raw = self.extractor.extract_matrix(times);
        let scaled = self.statistics.transform(&raw);
        self.model.predict_matrix(&scaled)
    }

    /// Human-readable fitted equation
    pub fn equation(&self) -> String {
        self.model.to_string()
    }
}
