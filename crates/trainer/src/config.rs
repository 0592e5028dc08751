//! Trainer Hyperparameters

use crate::TrainerError;
use serde::{Deserialize, Serialize};

/// Stop at a report point once the loss improves by less than `min_loss_delta`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyStopping {
    pub min_loss_delta: f64,
}

/// Gradient descent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Learning rate at epoch 0
    pub initial_learning_rate: f64,

    /// Learning rate at epoch `e` is `initial / (1 + decay_rate * e)`
    pub decay_rate: f64,

    /// Epoch budget
    pub epochs: usize,

    /// L2 regularization strength (λ); the bias is not regularized
    pub l2_penalty: f64,

    /// Epochs between loss reports
    pub report_interval: usize,

    /// Disabled by default: the full epoch budget always runs
    pub early_stopping: Option<EarlyStopping>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            initial_learning_rate: 0.1,
            decay_rate: 1e-10,
            epochs: 100_000,
            l2_penalty: 0.05,
            report_interval: 10_000,
            early_stopping: None,
        }
    }
}

impl TrainerConfig {
    /// Override the epoch budget
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Override the regularization strength
    pub fn with_l2_penalty(mut self, l2_penalty: f64) -> Self {
        self.l2_penalty = l2_penalty;
        self
    }

    /// Enable early stopping
    pub fn with_early_stopping(mut self, min_loss_delta: f64) -> Self {
        self.early_stopping = Some(EarlyStopping { min_loss_delta });
        self
    }

    /// Decayed learning rate for an epoch
    pub fn learning_rate_at(&self, epoch: usize) -> f64 {
        self.initial_learning_rate / (1.0 + self.decay_rate * epoch as f64)
    }

    /// Check hyperparameters before training
    pub fn validate(&self) -> Result<(), TrainerError> {
        if !(self.initial_learning_rate.is_finite() && self.initial_learning_rate > 0.0) {
            return Err(TrainerError::InvalidConfig(format!(
                "initial_learning_rate must be positive, got {}",
                self.initial_learning_rate
            )));
        }
        if !(self.decay_rate.is_finite() && self.decay_rate >= 0.0) {
            return Err(TrainerError::InvalidConfig(format!(
                "decay_rate must be non-negative, got {}",
                self.decay_rate
            )));
        }
        if !(self.l2_penalty.is_finite() && self.l2_penalty >= 0.0) {
            return Err(TrainerError::InvalidConfig(format!(
                "l2_penalty must be non-negative, got {}",
                self.l2_penalty
            )));
        }
        if self.epochs == 0 {
            return Err(TrainerError::InvalidConfig("epochs must be at least 1".into()));
        }
        if self.report_interval == 0 {
            return Err(TrainerError::InvalidConfig(
                "report_interval must be at least 1".into(),
            ));
        }
        if let Some(stopping) = self.early_stopping {
            if !(stopping.min_loss_delta.is_finite() && stopping.min_loss_delta >= 0.0) {
                return Err(TrainerError::InvalidConfig(format!(
                    "min_loss_delta must be non-negative, got {}",
                    stopping.min_loss_delta
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.initial_learning_rate, 0.1);
        assert_eq!(config.decay_rate, 1e-10);
        assert_eq!(config.epochs, 100_000);
        assert_eq!(config.l2_penalty, 0.05);
        assert_eq!(config.report_interval, 10_000);
        assert!(config.early_stopping.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_learning_rate_decay_is_non_increasing() {
        let config = TrainerConfig {
            decay_rate: 0.01,
            ..Default::default()
        };
        assert_eq!(config.learning_rate_at(0), 0.1);
        assert!((config.learning_rate_at(100) - 0.05).abs() < 1e-15);

        let mut previous = f64::INFINITY;
        for epoch in (0..10_000).step_by(97) {
            let lr = config.learning_rate_at(epoch);
            assert!(lr <= previous);
            previous = lr;
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TrainerConfig::default().with_epochs(0).validate().is_err());
        assert!(TrainerConfig::default().with_l2_penalty(-1.0).validate().is_err());
        assert!(TrainerConfig::default()
            .with_early_stopping(f64::NAN)
            .validate()
            .is_err());

        let config = TrainerConfig {
            initial_learning_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TrainerError::InvalidConfig(_))));

        let config = TrainerConfig {
            report_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    proptest! {
        #[test]
        fn learning_rate_never_increases(
            initial in 1e-6f64..10.0,
            decay in 0.0f64..1.0,
            a in 0usize..10_000_000,
            b in 0usize..10_000_000,
        ) {
            let config = TrainerConfig {
                initial_learning_rate: initial,
                decay_rate: decay,
                ..Default::default()
            };
            let (earlier, later) = (a.min(b), a.max(b));
            let lr_earlier = config.learning_rate_at(earlier);
            let lr_later = config.learning_rate_at(later);

            prop_assert!(lr_later > 0.0);
            prop_assert!(lr_later <= lr_earlier);
            prop_assert!(lr_earlier <= initial);
        }
    }
}
