//! Fixed-Width Feature Matrix

use crate::features::{FeatureVector, FEATURE_DIMENSION};
use crate::FeatureError;
use ndarray::{aview1, Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Row-major matrix of `m` observations × `FEATURE_DIMENSION` features.
///
/// The column count is fixed at construction; products with weight vectors
/// take `[f64; FEATURE_DIMENSION]` so the shapes are checked by the type
/// system rather than by broadcasting.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// Stack feature vectors as rows
    pub fn from_rows(rows: &[FeatureVector]) -> Self {
        let mut data = Array2::<f64>::zeros((rows.len(), FEATURE_DIMENSION));
        for (mut row, features) in data.axis_iter_mut(Axis(0)).zip(rows) {
            row.assign(&aview1(features.values()));
        }
        Self { data }
    }

    /// Wrap an existing array, checking its column count
    pub fn from_array(data: Array2<f64>) -> Result<Self, FeatureError> {
        if data.ncols() != FEATURE_DIMENSION {
            return Err(FeatureError::DimensionMismatch {
                expected: FEATURE_DIMENSION,
                actual: data.ncols(),
            });
        }
        Ok(Self { data })
    }

    /// Number of rows (observations)
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Copy of row `index` as a feature vector
    ///
    /// Panics if `index >= nrows()`.
    pub fn row(&self, index: usize) -> FeatureVector {
        let mut values = [0.0; FEATURE_DIMENSION];
        for (dst, src) in values.iter_mut().zip(self.data.row(index)) {
            *dst = *src;
        }
        FeatureVector::from_values(values)
    }

    /// View of column `index`
    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.column(index)
    }

    /// View of the underlying array
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// `X · w` (length `nrows()`)
    pub fn mat_vec(&self, weights: &[f64; FEATURE_DIMENSION]) -> Array1<f64> {
        self.data.dot(&aview1(weights))
    }

    /// `Xᵀ · v`, where `v` has one entry per row
    pub fn transpose_vec(&self, v: &Array1<f64>) -> Result<[f64; FEATURE_DIMENSION], FeatureError> {
        if v.len() != self.nrows() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.nrows(),
                actual: v.len(),
            });
        }

        let product = self.data.t().dot(v);
        let mut out = [0.0; FEATURE_DIMENSION];
        for (dst, src) in out.iter_mut().zip(product.iter()) {
            *dst = *src;
        }
        Ok(out)
    }

    /// Apply `f(column_index, value)` to every element
    pub(crate) fn map_columns<F>(&self, f: F) -> Self
    where
        F: Fn(usize, f64) -> f64,
    {
        let mut data = self.data.clone();
        for (j, mut column) in data.axis_iter_mut(Axis(1)).enumerate() {
            column.mapv_inplace(|x| f(j, x));
        }
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> FeatureMatrix {
        let mut a = [0.0; FEATURE_DIMENSION];
        let mut b = [0.0; FEATURE_DIMENSION];
        a[0] = 1.0;
        a[1] = 2.0;
        b[0] = 3.0;
        b[16] = 1.0;
        FeatureMatrix::from_rows(&[FeatureVector::from_values(a), FeatureVector::from_values(b)])
    }

    #[test]
    fn test_from_array_checks_width() {
        let err = FeatureMatrix::from_array(Array2::zeros((3, 4))).unwrap_err();
        assert_eq!(
            err,
            FeatureError::DimensionMismatch {
                expected: FEATURE_DIMENSION,
                actual: 4
            }
        );
        assert!(FeatureMatrix::from_array(Array2::zeros((3, FEATURE_DIMENSION))).is_ok());
    }

    #[test]
    fn test_mat_vec() {
        let mut w = [0.0; FEATURE_DIMENSION];
        w[0] = 2.0;
        w[16] = -1.0;
        let out = sample().mat_vec(&w);
        assert_eq!(out, array![2.0, 5.0]);
    }

    #[test]
    fn test_transpose_vec() {
        let m = sample();
        let out = m.transpose_vec(&array![1.0, 10.0]).unwrap();
        assert_eq!(out[0], 31.0);
        assert_eq!(out[1], 2.0);
        assert_eq!(out[16], 10.0);
        assert!(m.transpose_vec(&array![1.0]).is_err());
    }

    #[test]
    fn test_row_round_trip() {
        let m = sample();
        assert_eq!(m.row(1).values()[0], 3.0);
        assert_eq!(m.column(0).to_vec(), vec![1.0, 3.0]);
    }
}
