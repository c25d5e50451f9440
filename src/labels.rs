//! Class-label validation and one-hot encoding

use ndarray::{Array1, Array2};

use crate::error::{ClassifierError, Result};

/// Infer the number of classes from 0-indexed labels.
///
/// Labels must be contiguous: every class in `0..max+1` has to occur at least
/// once. A gap would silently produce an under-sized one-hot matrix downstream,
/// so it is rejected here.
pub fn infer_classes(t: &Array1<usize>) -> Result<usize> {
    if t.is_empty() {
        return Err(ClassifierError::InvalidInput(
            "target vector is empty".to_string(),
        ));
    }
    let n_classes = t.iter().max().unwrap() + 1;
    let mut seen = vec![false; n_classes];
    for &label in t.iter() {
        seen[label] = true;
    }
    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(ClassifierError::InvalidInput(format!(
            "class labels must be contiguous, class {} has no samples",
            missing
        )));
    }
    Ok(n_classes)
}

/// Validate that labels form exactly the binary set {0, 1}.
pub(crate) fn require_binary(t: &Array1<usize>) -> Result<()> {
    let n_classes = infer_classes(t)?;
    if n_classes != 2 {
        return Err(ClassifierError::InvalidInput(format!(
            "expected exactly 2 classes with labels {{0, 1}}, got {} classes",
            n_classes
        )));
    }
    Ok(())
}

/// One-hot encode labels into an `(n_samples, n_classes)` matrix.
pub fn one_hot(t: &Array1<usize>, n_classes: usize) -> Array2<f64> {
    let mut encoded = Array2::zeros((t.len(), n_classes));
    for (i, &label) in t.iter().enumerate() {
        encoded[[i, label]] = 1.0;
    }
    encoded
}

/// Index of the row-wise maximum of a score matrix.
pub(crate) fn argmax_rows(scores: &Array2<f64>) -> Array1<usize> {
    let labels: Vec<usize> = scores
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (j, &value) in row.iter().enumerate() {
                if value > row[best] {
                    best = j;
                }
            }
            best
        })
        .collect();
    Array1::from_vec(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_infer_classes() {
        let t = array![0usize, 1, 2, 1, 0];
        assert_eq!(infer_classes(&t).unwrap(), 3);
    }

    #[test]
    fn test_infer_classes_rejects_gap() {
        let t = array![0usize, 2, 2];
        assert!(infer_classes(&t).is_err());
    }

    #[test]
    fn test_infer_classes_rejects_empty() {
        let t: Array1<usize> = array![];
        assert!(infer_classes(&t).is_err());
    }

    #[test]
    fn test_require_binary() {
        assert!(require_binary(&array![0usize, 1, 0]).is_ok());
        assert!(require_binary(&array![0usize, 0]).is_err());
        assert!(require_binary(&array![0usize, 1, 2]).is_err());
    }

    #[test]
    fn test_one_hot() {
        let encoded = one_hot(&array![1usize, 0, 2], 3);
        assert_eq!(encoded, array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_argmax_rows() {
        let scores = array![[0.1, 0.7, 0.2], [0.9, 0.05, 0.05]];
        assert_eq!(argmax_rows(&scores), array![1usize, 0]);
    }
}
