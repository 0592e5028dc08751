//! Occupancy Inference Engine
//!
//! Wires feature engineering, scaling and training into a pipeline, and
//! serves non-negative occupancy predictions from the fitted model.

mod evaluation;
mod pipeline;
mod predictor;

pub use evaluation::Evaluation;
pub use pipeline::{FittedPipeline, PipelineConfig, TrainingPipeline};
pub use predictor::{clamp_occupancy, Prediction, Predictor};

use data_validator::ValidationError;
use feature_engine::FeatureError;
use thiserror::Error;
use trainer::TrainerError;

/// Errors during training or inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("No observations to train on")]
    NoObservations,
    #[error("Got {predicted} predictions for {actual} observations")]
    LengthMismatch { actual: usize, predicted: usize },
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] ValidationError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Training(#[from] TrainerError),
}
