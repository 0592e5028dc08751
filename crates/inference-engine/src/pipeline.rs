//! End-to-End Training Pipeline

use crate::predictor::Predictor;
use crate::InferenceError;
use data_validator::Observation;
use feature_engine::{DegeneratePolicy, FeatureExtractor, Scaler};
use serde::{Deserialize, Serialize};
use tracing::info;
use trainer::{Trainer, TrainerConfig, TrainingOutcome};

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Optimizer hyperparameters
    pub trainer: TrainerConfig,
    /// Handling of constant feature columns
    pub degenerate_policy: DegeneratePolicy,
}

/// Output of a training run
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    /// Predictor over the fitted model
    pub predictor: Predictor,
    /// Loss history and run summary
    pub outcome: TrainingOutcome,
}

/// observations → features → scaling → gradient descent → predictor
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    extractor: FeatureExtractor,
    scaler: Scaler,
    trainer: Trainer,
}

impl TrainingPipeline {
    /// Create a pipeline, validating the trainer configuration
    pub fn new(config: PipelineConfig) -> Result<Self, InferenceError> {
        Ok(Self {
            extractor: FeatureExtractor::new(),
            scaler: Scaler::new(config.degenerate_policy),
            trainer: Trainer::new(config.trainer)?,
        })
    }

    /// Fit a model to the observations
    pub fn run(&self, observations: &[Observation]) -> Result<FittedPipeline, InferenceError> {
        if observations.is_empty() {
            return Err(InferenceError::NoObservations);
        }

        let raw = self
            .extractor
            .extract_matrix(observations.iter().map(|o| &o.time));
        let statistics = self.scaler.fit(&raw)?;
        let scaled = statistics.transform(&raw);
        let targets: Vec<f64> = observations.iter().map(|o| o.count as f64).collect();

        let outcome = self.trainer.fit(&scaled, &targets)?;
        info!("Final model: {}", outcome.model);

        Ok(FittedPipeline {
            predictor: Predictor::new(statistics, outcome.model.clone()),
            outcome,
        })
    }
}
