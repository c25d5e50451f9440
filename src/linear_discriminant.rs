//! Linear discriminant analysis
//!
//! Binary classifier: project onto the Fisher direction given by the pooled
//! within-class scatter, then threshold where the two projected class
//! densities intersect.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::labels::require_binary;
use crate::linalg;
use crate::stats::GaussianSummary;

/// Floor applied to the direction norm before normalizing.
const NORM_FLOOR: f64 = 1e-10;

/// Binary linear discriminant classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearDiscriminantClassifier {
    /// Unit normal of the decision hyperplane
    pub direction: Option<Array1<f64>>,
    /// Decision boundary in the projected space
    pub threshold: Option<f64>,
}

impl Default for LinearDiscriminantClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearDiscriminantClassifier {
    pub fn new() -> Self {
        Self {
            direction: None,
            threshold: None,
        }
    }

    /// Estimate the projection direction and decision threshold.
    ///
    /// Requires exactly two classes labelled {0, 1}. A singular within-class
    /// scatter matrix is fatal. Known gap: when the two projected class
    /// variances are equal the threshold quadratic degenerates (division by
    /// zero) and the stored threshold may be non-finite; callers with
    /// equal-variance data should validate the result downstream.
    pub fn fit(&mut self, x: &Array2<f64>, t: &Array1<usize>) -> Result<&mut Self> {
        if x.nrows() != t.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} target labels", x.nrows()),
                actual: format!("{} target labels", t.len()),
            });
        }
        require_binary(t)?;

        let x0 = class_rows(x, t, 0);
        let x1 = class_rows(x, t, 1);

        // class means; both classes are non-empty after the label check
        let m0 = x0.mean_axis(Axis(0)).unwrap();
        let m1 = x1.mean_axis(Axis(0)).unwrap();

        // pooled within-class scatter
        let c0 = &x0 - &m0.clone().insert_axis(Axis(0));
        let c1 = &x1 - &m1.clone().insert_axis(Axis(0));
        let scatter = c0.t().dot(&c0) + c1.t().dot(&c1);

        let scatter_inv = linalg::matrix_inverse(&scatter).ok_or_else(|| {
            ClassifierError::ComputationError(
                "within-class scatter matrix is singular".to_string(),
            )
        })?;
        let mut direction = scatter_inv.dot(&(&m1 - &m0));
        let norm = direction.dot(&direction).sqrt().max(NORM_FLOOR);
        direction.mapv_inplace(|v| v / norm);

        let g0 = GaussianSummary::from_sample(&x0.dot(&direction));
        let g1 = GaussianSummary::from_sample(&x1.dot(&direction));

        // threshold where the two projected Gaussian densities are equal
        let a = g1.var - g0.var;
        let b = g0.var * g1.mean - g1.var * g0.mean;
        let c = g1.var * g0.mean * g0.mean
            - g0.var * g1.mean * g1.mean
            - g1.var * g0.var * (g1.var / g0.var).ln();
        self.threshold = Some(((b * b - a * c).sqrt() - b) / a);
        self.direction = Some(direction);

        Ok(self)
    }

    /// Predict 1 where the projection exceeds the threshold, else 0.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let direction = self.direction.as_ref().ok_or(ClassifierError::ModelNotFitted)?;
        let threshold = self.threshold.unwrap();
        if x.ncols() != direction.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} features", direction.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(x.dot(direction).mapv(|p| usize::from(p > threshold)))
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

/// Gather the rows of `x` whose label matches `label`.
fn class_rows(x: &Array2<f64>, t: &Array1<usize>, label: usize) -> Array2<f64> {
    let indices: Vec<usize> = t
        .iter()
        .enumerate()
        .filter(|(_, &l)| l == label)
        .map(|(i, _)| i)
        .collect();
    x.select(Axis(0), &indices)
}
