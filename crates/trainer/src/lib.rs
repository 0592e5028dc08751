//! Linear Model Trainer
//!
//! Fits a linear model over scaled features by full-batch gradient descent
//! with L2 regularization (bias excluded) and a decaying learning rate. The
//! loop runs a fixed epoch budget unless early stopping is configured.

mod config;
mod model;
mod state;
mod trainer;

pub use config::{EarlyStopping, TrainerConfig};
pub use model::LinearModel;
pub use state::{StepOutcome, TrainingState};
pub use trainer::{LossRecord, Trainer, TrainingOutcome};

use feature_engine::FeatureError;
use thiserror::Error;

/// Errors during training
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainerError {
    #[error("Invalid trainer config: {0}")]
    InvalidConfig(String),
    #[error("Training set is empty")]
    EmptyTrainingSet,
    #[error("Target length {targets} does not match {rows} feature rows")]
    TargetLengthMismatch { rows: usize, targets: usize },
    #[error("Loss became non-finite at epoch {epoch}")]
    NonFiniteLoss { epoch: usize },
    #[error(transparent)]
    Feature(#[from] FeatureError),
}
