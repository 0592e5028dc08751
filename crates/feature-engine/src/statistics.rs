//! Per-Column Statistics

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Summary statistics for one feature column
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl ColumnStatistics {
    /// Compute statistics over a column of values
    pub fn compute(values: ArrayView1<'_, f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        let mean = values.sum() / n;

        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        let m2: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        let std_dev = (m2 / n).sqrt();

        Self {
            mean,
            std_dev,
            min,
            max,
        }
    }

    /// Whether the column is constant up to rounding
    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= 1e-12 * self.mean.abs().max(1.0)
    }
}
