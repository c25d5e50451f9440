//! Bayesian logistic regression via the Laplace approximation
//!
//! Wraps the IRLS point estimate with a Gaussian posterior over the weights:
//! the log-posterior Hessian at the fitted mode becomes the posterior
//! precision, and prediction folds the resulting activation variance back into
//! the sigmoid with a probit-style moment-matching correction.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::linalg;
use crate::logistic::{irls_hessian, LogisticRegression};

/// Laplace-approximated binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BayesianLogisticRegression {
    base: LogisticRegression,
    /// Posterior covariance of the weights
    pub weight_covariance: Option<Array2<f64>>,
}

impl Default for BayesianLogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl BayesianLogisticRegression {
    pub fn new() -> Self {
        Self {
            base: LogisticRegression::new(),
            weight_covariance: None,
        }
    }

    /// Set the prior precision
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.base = self.base.with_alpha(alpha);
        self
    }

    /// Set the iteration cap
    pub fn with_iter_max(mut self, iter_max: usize) -> Self {
        self.base = self.base.with_iter_max(iter_max);
        self
    }

    /// Fitted posterior-mode weights
    pub fn weights(&self) -> Option<&Array1<f64>> {
        self.base.weights.as_ref()
    }

    /// Iterations taken by the embedded IRLS fit
    pub fn n_iter(&self) -> usize {
        self.base.n_iter
    }

    /// Run the embedded IRLS fit, then invert the log-posterior Hessian at the
    /// fitted mode into the weight posterior covariance.
    ///
    /// A singular Hessian here is fatal: without the covariance the predictive
    /// distribution is undefined.
    pub fn fit(&mut self, x: &Array2<f64>, t: &Array1<usize>) -> Result<&mut Self> {
        self.base.fit(x, t)?;

        let y = self.base.predict_proba(x)?;
        let hessian = irls_hessian(x, &y, self.base.alpha);
        let covariance = linalg::matrix_inverse(&hessian).ok_or_else(|| {
            ClassifierError::ComputationError(
                "log-posterior Hessian is singular, cannot form the weight covariance".to_string(),
            )
        })?;

        self.weight_covariance = Some(covariance);
        Ok(self)
    }

    /// Point-estimate probability of class 1 (no uncertainty correction).
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.base.predict_proba(x)
    }

    /// Predict 1 where the class-1 probability exceeds 0.5, else 0.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        self.base.predict(x)
    }

    /// Predictive class-1 probability with posterior weight uncertainty folded
    /// in: σ(μ / sqrt(1 + π·σ²/8)) per row, where μ = x·w and σ² is the
    /// activation variance under the weight posterior. The correction only
    /// shrinks probabilities toward 0.5.
    pub fn predict_dist(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self.base.weights.as_ref().ok_or(ClassifierError::ModelNotFitted)?;
        let covariance = self
            .weight_covariance
            .as_ref()
            .ok_or(ClassifierError::ModelNotFitted)?;
        if x.ncols() != weights.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} features", weights.len()),
                actual: format!("{} features", x.ncols()),
            });
        }

        let mean = x.dot(weights);
        // diagonal of X·Σ·Xᵀ without forming the full matrix
        let variance = (x.dot(covariance) * x).sum_axis(Axis(1));
        let adjusted = &mean / &variance.mapv(|v| (1.0 + PI * v / 8.0).sqrt());
        Ok(LogisticRegression::sigmoid(&adjusted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable_data() -> (Array2<f64>, Array1<usize>) {
        (
            array![
                [1.0, -2.0],
                [1.0, -1.2],
                [1.0, -0.8],
                [1.0, 0.8],
                [1.0, 1.4],
                [1.0, 2.0]
            ],
            array![0usize, 0, 0, 1, 1, 1],
        )
    }

    #[test]
    fn test_predictive_shrinks_toward_half() {
        let (x, t) = separable_data();
        let mut model = BayesianLogisticRegression::new().with_alpha(0.5);
        model.fit(&x, &t).unwrap();

        let point = model.predict_proba(&x).unwrap();
        let dist = model.predict_dist(&x).unwrap();
        for (&p, &d) in point.iter().zip(dist.iter()) {
            // the corrected probability lies between the point estimate and 0.5
            assert!((d - 0.5).abs() <= (p - 0.5).abs() + 1e-12);
            assert!((d - 0.5) * (p - 0.5) >= 0.0);
        }
    }

    #[test]
    fn test_point_predictions_match_embedded_estimator() {
        let (x, t) = separable_data();
        let mut bayes = BayesianLogisticRegression::new().with_alpha(0.5);
        let mut plain = LogisticRegression::new().with_alpha(0.5);
        bayes.fit(&x, &t).unwrap();
        plain.fit(&x, &t).unwrap();

        assert_eq!(bayes.weights().unwrap(), plain.weights.as_ref().unwrap());
        assert_eq!(bayes.n_iter(), plain.n_iter);
        assert_eq!(
            bayes.predict_proba(&x).unwrap(),
            plain.predict_proba(&x).unwrap()
        );
    }

    #[test]
    fn test_predict_dist_before_fit_fails() {
        let model = BayesianLogisticRegression::new();
        assert!(matches!(
            model.predict_dist(&array![[1.0, 0.0]]),
            Err(ClassifierError::ModelNotFitted)
        ));
    }
}
