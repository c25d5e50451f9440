//! Kernel functions for the Gaussian Process classifier

use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Batch size above which the Gram matrix is filled row-parallel.
const PARALLEL_GRAM_THRESHOLD: usize = 100;

/// Kernel function type.
///
/// Kernels used with a Gaussian Process must be symmetric and at least
/// approximately positive semi-definite; all variants here satisfy that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KernelType {
    /// Radial basis function (squared exponential): exp(-||a - b||² / 2ℓ²)
    Rbf { length_scale: f64 },
    /// Matérn kernel. nu ∈ {0.5, 1.5, 2.5} use the closed forms; other values
    /// fall back to an RBF-like shape.
    Matern { nu: f64, length_scale: f64 },
    /// Rational quadratic: (1 + ||a - b||² / 2αℓ²)^(-α)
    RationalQuadratic { length_scale: f64, alpha: f64 },
    /// Sum of two kernels
    Sum(Box<KernelType>, Box<KernelType>),
    /// Product of two kernels
    Product(Box<KernelType>, Box<KernelType>),
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::Rbf { length_scale: 1.0 }
    }
}

impl KernelType {
    /// Evaluate the kernel between two feature vectors.
    pub fn eval(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        match self {
            KernelType::Rbf { length_scale } => {
                let sq_dist = squared_distance(a, b);
                (-0.5 * sq_dist / (length_scale * length_scale)).exp()
            }
            KernelType::Matern { nu, length_scale } => {
                let r = squared_distance(a, b).sqrt() / length_scale;
                if r < 1e-10 {
                    return 1.0;
                }
                if (*nu - 0.5).abs() < 1e-6 {
                    // Matérn 1/2 (exponential)
                    (-r).exp()
                } else if (*nu - 1.5).abs() < 1e-6 {
                    let sqrt3 = 3.0_f64.sqrt();
                    (1.0 + sqrt3 * r) * (-sqrt3 * r).exp()
                } else if (*nu - 2.5).abs() < 1e-6 {
                    let sqrt5 = 5.0_f64.sqrt();
                    (1.0 + sqrt5 * r + 5.0 / 3.0 * r * r) * (-sqrt5 * r).exp()
                } else {
                    let scaled = (2.0 * nu).sqrt() * r;
                    (-0.5 * scaled * scaled).exp()
                }
            }
            KernelType::RationalQuadratic { length_scale, alpha } => {
                let sq_dist = squared_distance(a, b);
                (1.0 + sq_dist / (2.0 * alpha * length_scale * length_scale)).powf(-*alpha)
            }
            KernelType::Sum(k1, k2) => k1.eval(a, b) + k2.eval(a, b),
            KernelType::Product(k1, k2) => k1.eval(a, b) * k2.eval(a, b),
        }
    }

    /// Pairwise kernel matrix between two batches of row vectors.
    pub fn pairwise(&self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        let n = x.nrows();
        let m = y.nrows();
        let mut k = Array2::zeros((n, m));

        if n.max(m) > PARALLEL_GRAM_THRESHOLD {
            let rows: Vec<Vec<f64>> = (0..n)
                .into_par_iter()
                .map(|i| {
                    let xi = x.row(i);
                    (0..m).map(|j| self.eval(xi, y.row(j))).collect()
                })
                .collect();
            for (i, row) in rows.into_iter().enumerate() {
                for (j, value) in row.into_iter().enumerate() {
                    k[[i, j]] = value;
                }
            }
        } else {
            for i in 0..n {
                let xi = x.row(i);
                for j in 0..m {
                    k[[i, j]] = self.eval(xi, y.row(j));
                }
            }
        }
        k
    }
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&ai, &bi)| (ai - bi) * (ai - bi))
        .sum()
}
