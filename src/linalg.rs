//! Dense linear algebra primitives shared by the classifiers
//!
//! Small direct solvers: Cholesky for symmetric positive-definite systems with
//! a Gauss-Jordan fallback, and an explicit inverse for the closed-form
//! estimators. Singular input is signalled with `None` instead of a silently
//! wrong result.

use ndarray::{Array, Array1, Array2, Dimension};

/// Pivot magnitude below which a matrix is treated as singular.
const SINGULARITY_EPS: f64 = 1e-10;

/// Solve Ax = b via Cholesky decomposition. A must be symmetric positive
/// definite; returns `None` when the factorization breaks down.
pub(crate) fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    // Factorization: A = L * L^T
    let mut l: Array2<f64> = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L * y = b
    let mut y: Array1<f64> = Array1::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[[i, j]] * y[j]).sum();
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Back substitution: L^T * x = y
    let mut x: Array1<f64> = Array1::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|j| l[[j, i]] * x[j]).sum();
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
/// Returns `None` on singular or near-singular input.
pub(crate) fn matrix_inverse(m: &Array2<f64>) -> Option<Array2<f64>> {
    let n = m.nrows();
    if n != m.ncols() {
        return None;
    }

    // Augment [M | I]
    let mut aug: Array2<f64> = Array2::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = m[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        let mut max_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[max_row, col]].abs() {
                max_row = row;
            }
        }

        if max_row != col {
            for j in 0..2 * n {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[max_row, j]];
                aug[[max_row, j]] = tmp;
            }
        }

        if aug[[col, col]].abs() < SINGULARITY_EPS {
            return None;
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                for j in 0..2 * n {
                    aug[[row, j]] -= factor * aug[[col, j]];
                }
            }
        }
    }

    let mut inv: Array2<f64> = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }

    Some(inv)
}

/// Solve a symmetric system, trying Cholesky first and falling back to an
/// explicit Gauss-Jordan inverse for matrices that are symmetric but not
/// positive definite.
pub(crate) fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    if let Some(x) = cholesky_solve(a, b) {
        return Some(x);
    }
    matrix_inverse(a).map(|inv| inv.dot(b))
}

/// Elementwise closeness test with numpy-style tolerances
/// (|a - b| <= atol + rtol * |b|, rtol = 1e-5, atol = 1e-8).
pub(crate) fn allclose<D: Dimension>(a: &Array<f64, D>, b: &Array<f64, D>) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| (x - y).abs() <= 1e-8 + 1e-5 * y.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cholesky_solves_spd_system() {
        let a = array![[4.0, 2.0, 1.0], [2.0, 5.0, 3.0], [1.0, 3.0, 6.0]];
        let b = array![1.0, 2.0, 3.0];
        let x = cholesky_solve(&a, &b).unwrap();
        let residual = a.dot(&x) - &b;
        for r in residual.iter() {
            assert!(r.abs() < 1e-10);
        }
    }

    #[test]
    fn test_cholesky_rejects_indefinite() {
        let a = array![[1.0, 2.0], [2.0, 1.0]];
        let b = array![1.0, 1.0];
        assert!(cholesky_solve(&a, &b).is_none());
        // the fallback path still solves it
        let x = solve(&a, &b).unwrap();
        let residual = a.dot(&x) - &b;
        for r in residual.iter() {
            assert!(r.abs() < 1e-10);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = array![[2.0, 1.0], [1.0, 3.0]];
        let inv = matrix_inverse(&m).unwrap();
        let product = m.dot(&inv);
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_singular_returns_none() {
        let m = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(matrix_inverse(&m).is_none());
    }

    #[test]
    fn test_allclose() {
        let a = array![1.0, 2.0, 3.0];
        assert!(allclose(&a, &array![1.0 + 1e-9, 2.0, 3.0]));
        assert!(!allclose(&a, &array![1.01, 2.0, 3.0]));
    }
}
