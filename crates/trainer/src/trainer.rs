//! Gradient Descent Training Loop

use crate::config::TrainerConfig;
use crate::model::LinearModel;
use crate::state::TrainingState;
use crate::TrainerError;
use feature_engine::FeatureMatrix;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Loss sampled at a report epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossRecord {
    pub epoch: usize,
    pub loss: f64,
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Fitted parameters
    pub model: LinearModel,
    /// Loss at every report epoch, starting at epoch 0
    pub loss_history: Vec<LossRecord>,
    /// Epochs actually run
    pub epochs_run: usize,
    /// Whether early stopping ended the run before the budget
    pub stopped_early: bool,
}

impl TrainingOutcome {
    /// Loss recorded at `epoch`, if it was a report epoch
    pub fn loss_at(&self, epoch: usize) -> Option<f64> {
        self.loss_history
            .iter()
            .find(|r| r.epoch == epoch)
            .map(|r| r.loss)
    }
}

/// Full-batch gradient descent trainer
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Create a trainer, validating the configuration
    pub fn new(config: TrainerConfig) -> Result<Self, TrainerError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Trainer configuration
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit weights and bias to `(x, y)`; `x` must already be scaled
    pub fn fit(&self, x: &FeatureMatrix, y: &[f64]) -> Result<TrainingOutcome, TrainerError> {
        if x.is_empty() {
            return Err(TrainerError::EmptyTrainingSet);
        }
        if y.len() != x.nrows() {
            return Err(TrainerError::TargetLengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }

        let y = Array1::from(y.to_vec());
        let config = &self.config;

        info!(
            "Training on {} observations: epochs={}, lr={}, decay={}, lambda={}",
            x.nrows(),
            config.epochs,
            config.initial_learning_rate,
            config.decay_rate,
            config.l2_penalty
        );

        let mut state = TrainingState::initial(config);
        let mut loss_history: Vec<LossRecord> = Vec::new();
        let mut stopped_early = false;

        for epoch in 0..config.epochs {
            let outcome = state.step(x, &y, config)?;
            state = outcome.state;

            if epoch % config.report_interval != 0 {
                continue;
            }

            let loss = outcome.mse + state.l2_term(config.l2_penalty, x.nrows());
            if !loss.is_finite() {
                return Err(TrainerError::NonFiniteLoss { epoch });
            }
            info!("Epoch {}: Loss = {:.2}", epoch, loss);

            let previous = loss_history.last().map(|r| r.loss);
            loss_history.push(LossRecord { epoch, loss });

            if let (Some(stopping), Some(previous)) = (config.early_stopping, previous) {
                if previous - loss < stopping.min_loss_delta {
                    debug!(
                        "Loss improved by {} < {}, stopping at epoch {}",
                        previous - loss,
                        stopping.min_loss_delta,
                        epoch
                    );
                    stopped_early = true;
                    break;
                }
            }
        }

        let epochs_run = state.epoch();
        info!("Training finished after {} epochs", epochs_run);

        Ok(TrainingOutcome {
            model: state.into_model(),
            loss_history,
            epochs_run,
            stopped_early,
        })
    }
}
