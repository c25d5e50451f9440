//! Multinomial logistic regression
//!
//! K-class IRLS with a block-diagonal Hessian: each class column gets its own
//! Newton system built from that class's predicted variance. Cross-class
//! second-order coupling is deliberately not modeled, so the update is an
//! approximation to the exact multinomial Newton step with every block kept at
//! `(n_features, n_features)`.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::labels::{argmax_rows, infer_classes, one_hot};
use crate::linalg;
use crate::logistic::irls_hessian;

/// K-class logistic regression classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialLogisticRegression {
    /// Prior precision (L2 regularization strength)
    pub alpha: f64,
    /// Maximum number of Newton iterations
    pub iter_max: usize,
    /// Fitted weight matrix `(n_features, n_classes)`
    pub weights: Option<Array2<f64>>,
    /// Iterations taken by the last fit (1-based)
    pub n_iter: usize,
}

impl Default for MultinomialLogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl MultinomialLogisticRegression {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            iter_max: 100,
            weights: None,
            n_iter: 0,
        }
    }

    /// Set the prior precision
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the iteration cap
    pub fn with_iter_max(mut self, iter_max: usize) -> Self {
        self.iter_max = iter_max;
        self
    }

    /// Row-wise softmax, stabilized by subtracting the row maximum before
    /// exponentiating.
    fn softmax(activations: &Array2<f64>) -> Array2<f64> {
        let mut out = activations.clone();
        for mut row in out.rows_mut() {
            let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
            row.mapv_inplace(|v| (v - max).exp());
            let sum = row.sum();
            row.mapv_inplace(|v| v / sum);
        }
        out
    }

    /// Fit by per-class Newton-Raphson IRLS from a zero weight matrix.
    ///
    /// A singular Hessian block in any class discards that whole iteration's
    /// update and stops, keeping the previous weights. `n_iter` records the
    /// 1-based stopping iteration.
    pub fn fit(&mut self, x: &Array2<f64>, t: &Array1<usize>) -> Result<&mut Self> {
        if x.nrows() != t.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} target labels", x.nrows()),
                actual: format!("{} target labels", t.len()),
            });
        }
        if self.alpha < 0.0 {
            return Err(ClassifierError::InvalidParameter {
                name: "alpha".to_string(),
                value: self.alpha.to_string(),
                reason: "prior precision must be non-negative".to_string(),
            });
        }

        let n_classes = infer_classes(t)?;
        let targets = one_hot(t, n_classes);
        let n_features = x.ncols();

        let mut weights: Array2<f64> = Array2::zeros((n_features, n_classes));
        let mut n_iter = 0;

        for iteration in 0..self.iter_max {
            n_iter = iteration + 1;
            let previous = weights.clone();

            let y = Self::softmax(&x.dot(&weights));
            let gradient = x.t().dot(&(&y - &targets)) + self.alpha * &weights;

            // one Newton system per class; abandon the whole update if any
            // block is singular
            let mut steps: Array2<f64> = Array2::zeros((n_features, n_classes));
            let mut singular = false;
            for class in 0..n_classes {
                let y_class = y.column(class).to_owned();
                let hessian = irls_hessian(x, &y_class, self.alpha);
                match linalg::solve(&hessian, &gradient.column(class).to_owned()) {
                    Some(step) => steps.column_mut(class).assign(&step),
                    None => {
                        singular = true;
                        break;
                    }
                }
            }
            if singular {
                break;
            }

            weights -= &steps;
            if linalg::allclose(&previous, &weights) {
                break;
            }
        }
        debug!("multinomial logistic regression stopped after {} iterations", n_iter);

        self.weights = Some(weights);
        self.n_iter = n_iter;
        Ok(self)
    }

    /// Per-class probabilities, one row per sample.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let weights = self.weights.as_ref().ok_or(ClassifierError::ModelNotFitted)?;
        if x.ncols() != weights.nrows() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} features", weights.nrows()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(Self::softmax(&x.dot(weights)))
    }

    /// Predict the most probable class per row.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        Ok(argmax_rows(&self.predict_proba(x)?))
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
