//! Binary logistic regression fit by iteratively reweighted least squares
//!
//! Newton-Raphson updates on the penalized log-likelihood; the optional prior
//! precision `alpha` adds ridge-style regularization to both the gradient and
//! the Hessian.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::labels::require_binary;
use crate::linalg;

/// Binary logistic regression classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Prior precision (L2 regularization strength)
    pub alpha: f64,
    /// Maximum number of Newton iterations
    pub iter_max: usize,
    /// Fitted weight vector
    pub weights: Option<Array1<f64>>,
    /// Iterations taken by the last fit (1-based)
    pub n_iter: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
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

    /// Sigmoid function. No overflow guarding: large activations saturate to
    /// 0 or 1 under standard floating-point semantics.
    pub(crate) fn sigmoid(a: &Array1<f64>) -> Array1<f64> {
        a.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    /// Fit by Newton-Raphson IRLS from a zero weight vector.
    ///
    /// Iteration stops at convergence (elementwise closeness of consecutive
    /// weight vectors), at the iteration cap, or when the Hessian solve fails,
    /// in which case the last valid estimate is kept. `n_iter` records the
    /// 1-based stopping iteration.
    pub fn fit(&mut self, x: &Array2<f64>, t: &Array1<usize>) -> Result<&mut Self> {
        if x.nrows() != t.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} target labels", x.nrows()),
                actual: format!("{} target labels", t.len()),
            });
        }
        require_binary(t)?;
        if self.alpha < 0.0 {
            return Err(ClassifierError::InvalidParameter {
                name: "alpha".to_string(),
                value: self.alpha.to_string(),
                reason: "prior precision must be non-negative".to_string(),
            });
        }

        let targets = t.mapv(|label| label as f64);
        let mut weights: Array1<f64> = Array1::zeros(x.ncols());
        let mut n_iter = 0;

        for iteration in 0..self.iter_max {
            n_iter = iteration + 1;
            let previous = weights.clone();

            let y = Self::sigmoid(&x.dot(&weights));
            let gradient = x.t().dot(&(&y - &targets)) + self.alpha * &weights;
            let hessian = irls_hessian(x, &y, self.alpha);

            match linalg::solve(&hessian, &gradient) {
                Some(step) => weights -= &step,
                // singular Hessian: keep the last valid estimate
                None => break,
            }
            if linalg::allclose(&previous, &weights) {
                break;
            }
        }
        debug!("logistic regression stopped after {} iterations", n_iter);

        self.weights = Some(weights);
        self.n_iter = n_iter;
        Ok(self)
    }

    /// Probability of class 1 for each row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self.weights.as_ref().ok_or(ClassifierError::ModelNotFitted)?;
        if x.ncols() != weights.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} features", weights.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(Self::sigmoid(&x.dot(weights)))
    }

    /// Predict 1 where the class-1 probability exceeds 0.5, else 0.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        Ok(self.predict_proba(x)?.mapv(|p| usize::from(p > 0.5)))
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

/// IRLS Hessian: Xᵀ·diag(y(1−y))·X + αI.
pub(crate) fn irls_hessian(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Array2<f64> {
    let variance = y.mapv(|p| p * (1.0 - p));
    let weighted = x * &variance.insert_axis(Axis(1));
    let mut hessian = x.t().dot(&weighted);
    for i in 0..hessian.nrows() {
        hessian[[i, i]] += alpha;
    }
    hessian
}
