//! Gaussian summary statistics for projected samples

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Mean and population variance of a 1-D sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianSummary {
    pub mean: f64,
    pub var: f64,
}

impl GaussianSummary {
    /// Summarize a sample in a single pass (Welford's algorithm).
    ///
    /// An empty sample yields mean 0 and variance 0.
    pub fn from_sample(sample: &Array1<f64>) -> Self {
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut count = 0usize;
        for &value in sample.iter() {
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }
        let var = if count > 0 { m2 / count as f64 } else { 0.0 };
        Self { mean, var }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean_and_population_variance() {
        let summary = GaussianSummary::from_sample(&array![1.0, 2.0, 3.0, 4.0]);
        assert!((summary.mean - 2.5).abs() < 1e-12);
        assert!((summary.var - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_constant_sample_has_zero_variance() {
        let summary = GaussianSummary::from_sample(&array![3.0, 3.0, 3.0]);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.var, 0.0);
    }

    #[test]
    fn test_empty_sample() {
        let summary = GaussianSummary::from_sample(&array![]);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.var, 0.0);
    }
}
