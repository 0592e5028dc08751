//! Optimizer State and Single-Epoch Update

use crate::config::TrainerConfig;
use crate::model::LinearModel;
use crate::TrainerError;
use feature_engine::{FeatureMatrix, FEATURE_DIMENSION};
use ndarray::Array1;

/// Parameters of one training run between epochs.
///
/// `step` never mutates `self`; it returns the next state, so every epoch
/// reads only the previous epoch's weights.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingState {
    epoch: usize,
    weights: [f64; FEATURE_DIMENSION],
    bias: f64,
    learning_rate: f64,
}

/// Result of one epoch
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// State after the update
    pub state: TrainingState,
    /// Mean squared error of the residuals before the update
    pub mse: f64,
}

impl TrainingState {
    /// Epoch 0: zero weights and bias
    pub fn initial(config: &TrainerConfig) -> Self {
        Self {
            epoch: 0,
            weights: [0.0; FEATURE_DIMENSION],
            bias: 0.0,
            learning_rate: config.learning_rate_at(0),
        }
    }

    /// Number of completed epochs
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Current weights
    pub fn weights(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.weights
    }

    /// Current bias
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Learning rate applied by the most recent step
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// `λ/(2m) · ‖w‖²`
    pub fn l2_term(&self, l2_penalty: f64, rows: usize) -> f64 {
        let norm_sq: f64 = self.weights.iter().map(|w| w * w).sum();
        (l2_penalty / (2.0 * rows as f64)) * norm_sq
    }

    /// One full-batch gradient descent update over `(x, y)`
    pub fn step(
        &self,
        x: &FeatureMatrix,
        y: &Array1<f64>,
        config: &TrainerConfig,
    ) -> Result<StepOutcome, TrainerError> {
        if x.is_empty() {
            return Err(TrainerError::EmptyTrainingSet);
        }
        if y.len() != x.nrows() {
            return Err(TrainerError::TargetLengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }

        let m = x.nrows() as f64;
        let learning_rate = config.learning_rate_at(self.epoch);

        let prediction = x.mat_vec(&self.weights) + self.bias;
        let error = y - &prediction;
        let xt_error = x.transpose_vec(&error)?;

        let mut weights = self.weights;
        for j in 0..FEATURE_DIMENSION {
            let dw = (-2.0 / m) * xt_error[j] + (config.l2_penalty / m) * self.weights[j];
            weights[j] -= learning_rate * dw;
        }

        let db = (-2.0 / m) * error.sum();
        let bias = self.bias - learning_rate * db;

        let mse = error.dot(&error) / m;

        Ok(StepOutcome {
            state: Self {
                epoch: self.epoch + 1,
                weights,
                bias,
                learning_rate,
            },
            mse,
        })
    }

    /// Freeze the parameters into a model
    pub fn into_model(self) -> LinearModel {
        LinearModel::new(self.weights, self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use proptest::prelude::*;

    fn two_rows() -> FeatureMatrix {
        let mut data = Array2::<f64>::zeros((2, FEATURE_DIMENSION));
        data[[0, 0]] = 1.0;
        data[[0, 1]] = -1.0;
        data[[1, 0]] = 2.0;
        data[[1, 2]] = 0.5;
        FeatureMatrix::from_array(data).unwrap()
    }

    #[test]
    fn test_first_step_from_zero() {
        let config = TrainerConfig::default().with_l2_penalty(0.0);
        let state = TrainingState::initial(&config);
        let y = array![1.0, 3.0];

        let outcome = state.step(&two_rows(), &y, &config).unwrap();
        let next = &outcome.state;

        // Prediction is 0, so error = y and dw_j = -(x0j * 1 + x1j * 3)
        assert_eq!(next.epoch(), 1);
        assert!((next.weights()[0] - 0.1 * 7.0).abs() < 1e-12);
        assert!((next.weights()[1] - 0.1 * -1.0).abs() < 1e-12);
        assert!((next.weights()[2] - 0.1 * 1.5).abs() < 1e-12);
        assert_eq!(next.weights()[3], 0.0);
        assert!((next.bias() - 0.4).abs() < 1e-12);
        assert!((outcome.mse - 5.0).abs() < 1e-12);
        assert_eq!(next.learning_rate(), 0.1);
    }

    #[test]
    fn test_regularization_shrinks_weights_not_bias() {
        let config = TrainerConfig::default().with_l2_penalty(2.0);
        let mut weights = [0.0; FEATURE_DIMENSION];
        weights[5] = 1.0;
        let state = TrainingState {
            epoch: 0,
            weights,
            bias: 3.0,
            learning_rate: 0.1,
        };

        // All-zero features and zero residuals isolate the penalty gradient
        let x = FeatureMatrix::from_array(Array2::zeros((2, FEATURE_DIMENSION))).unwrap();
        let y = array![3.0, 3.0];
        let next = state.step(&x, &y, &config).unwrap().state;

        // dw = (λ/m) w = 1.0, so w -= 0.1
        assert!((next.weights()[5] - 0.9).abs() < 1e-12);
        assert_eq!(next.bias(), 3.0);
    }

    #[test]
    fn test_step_leaves_previous_state_untouched() {
        let config = TrainerConfig::default();
        let state = TrainingState::initial(&config);
        let before = state.clone();
        let _ = state.step(&two_rows(), &array![1.0, 3.0], &config).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_step_rejects_bad_shapes() {
        let config = TrainerConfig::default();
        let state = TrainingState::initial(&config);
        assert_eq!(
            state.step(&two_rows(), &array![1.0], &config).unwrap_err(),
            TrainerError::TargetLengthMismatch { rows: 2, targets: 1 }
        );

        let empty = FeatureMatrix::from_rows(&[]);
        assert_eq!(
            state.step(&empty, &Array1::zeros(0), &config).unwrap_err(),
            TrainerError::EmptyTrainingSet
        );
    }

    #[test]
    fn test_l2_term() {
        let mut weights = [0.0; FEATURE_DIMENSION];
        weights[0] = 3.0;
        weights[1] = 4.0;
        let state = TrainingState {
            epoch: 0,
            weights,
            bias: 0.0,
            learning_rate: 0.1,
        };
        assert!((state.l2_term(0.5, 5) - 1.25).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn bias_update_ignores_l2_penalty(
            weights in prop::array::uniform17(-10.0f64..10.0),
            bias in -50.0f64..50.0,
            y0 in -100.0f64..100.0,
            y1 in -100.0f64..100.0,
            lambda_a in 0.0f64..5.0,
            lambda_b in 0.0f64..5.0,
        ) {
            let state = TrainingState {
                epoch: 0,
                weights,
                bias,
                learning_rate: 0.1,
            };
            let y = array![y0, y1];
            let a = TrainerConfig::default().with_l2_penalty(lambda_a);
            let b = TrainerConfig::default().with_l2_penalty(lambda_b);

            let next_a = state.step(&two_rows(), &y, &a).unwrap();
            let next_b = state.step(&two_rows(), &y, &b).unwrap();

            prop_assert_eq!(next_a.state.bias(), next_b.state.bias());
            prop_assert_eq!(next_a.mse, next_b.mse);
        }
    }
}
