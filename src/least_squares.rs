//! Least-squares classification
//!
//! Closed-form multi-class classifier: regress one-hot targets on the inputs
//! and take the per-row argmax of the fitted linear map. Purely geometric, no
//! probabilistic output.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::labels::{argmax_rows, infer_classes, one_hot};
use crate::linalg;

/// Multi-class least-squares classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeastSquaresClassifier {
    /// Fitted weight matrix `(n_features, n_classes)`
    pub weights: Option<Array2<f64>>,
}

impl Default for LeastSquaresClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LeastSquaresClassifier {
    pub fn new() -> Self {
        Self { weights: None }
    }

    /// Fit by regressing one-hot targets on the inputs: the weights solve the
    /// normal equations `(XᵀX)·W = Xᵀ·T`, one class column at a time.
    ///
    /// A degenerate design matrix (singular `XᵀX`) is fatal and surfaces as
    /// [`ClassifierError::ComputationError`].
    pub fn fit(&mut self, x: &Array2<f64>, t: &Array1<usize>) -> Result<&mut Self> {
        if x.nrows() != t.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} target labels", x.nrows()),
                actual: format!("{} target labels", t.len()),
            });
        }

        let n_classes = infer_classes(t)?;
        let targets = one_hot(t, n_classes);

        let xtx = x.t().dot(x);
        let xtt = x.t().dot(&targets);

        let mut weights = Array2::zeros((x.ncols(), n_classes));
        for class in 0..n_classes {
            let rhs = xtt.column(class).to_owned();
            let solved = linalg::solve(&xtx, &rhs).ok_or_else(|| {
                ClassifierError::ComputationError(
                    "design matrix is degenerate, cannot solve the normal equations".to_string(),
                )
            })?;
            weights.column_mut(class).assign(&solved);
        }

        self.weights = Some(weights);
        Ok(self)
    }

    /// Predict class labels as the row-wise argmax of the linear scores.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let weights = self.weights.as_ref().ok_or(ClassifierError::ModelNotFitted)?;
        if x.ncols() != weights.nrows() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} features", weights.nrows()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(argmax_rows(&x.dot(weights)))
    }

    /// Get accuracy score
    pub fn score(&self, x: &Array2<f64>, t: &Array1<usize>) -> Result<f64> {
        let predicted = self.predict(x)?;
        let correct = predicted
            .iter()
            .zip(t.iter())
            .filter(|(p, actual)| p == actual)
            .count();
        Ok(correct as f64 / t.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_separable_classes_recovered() {
        // two clusters on either side of the origin, bias column included
        let x = array![
            [1.0, -2.0],
            [1.0, -1.5],
            [1.0, -1.0],
            [1.0, 1.0],
            [1.0, 1.5],
            [1.0, 2.0]
        ];
        let t = array![0usize, 0, 0, 1, 1, 1];

        let mut model = LeastSquaresClassifier::new();
        model.fit(&x, &t).unwrap();
        assert_eq!(model.predict(&x).unwrap(), t);
        assert_eq!(model.score(&x, &t).unwrap(), 1.0);
    }

    #[test]
    fn test_three_class_weights_shape() {
        let x = array![
            [1.0, 0.0, 0.1],
            [1.0, 0.2, 0.0],
            [0.0, 1.0, 0.1],
            [0.1, 1.0, 0.0],
            [0.0, 0.1, 1.0],
            [0.1, 0.0, 1.0]
        ];
        let t = array![0usize, 0, 1, 1, 2, 2];

        let mut model = LeastSquaresClassifier::new();
        model.fit(&x, &t).unwrap();
        let weights = model.weights.as_ref().unwrap();
        assert_eq!(weights.dim(), (3, 3));
        assert_eq!(model.predict(&x).unwrap(), t);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = LeastSquaresClassifier::new();
        let result = model.predict(&array![[1.0, 2.0]]);
        assert!(matches!(result, Err(ClassifierError::ModelNotFitted)));
    }

    #[test]
    fn test_degenerate_design_matrix_is_fatal() {
        // second feature is an exact copy of the first
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let t = array![0usize, 0, 1, 1];
        let mut model = LeastSquaresClassifier::new();
        assert!(matches!(
            model.fit(&x, &t),
            Err(ClassifierError::ComputationError(_))
        ));
    }
}
