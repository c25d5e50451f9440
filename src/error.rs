//! Error types for the linear-classifiers crate

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Main error type for classifier fitting and prediction
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Model not fitted")]
    ModelNotFitted,
}

impl From<ndarray::ShapeError> for ClassifierError {
    fn from(err: ndarray::ShapeError) -> Self {
        ClassifierError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClassifierError::InvalidInput("labels out of range".to_string());
        assert_eq!(err.to_string(), "Invalid input: labels out of range");
    }

    #[test]
    fn test_shape_error_display() {
        let err = ClassifierError::ShapeError {
            expected: "3 features".to_string(),
            actual: "2 features".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid shape: expected 3 features, got 2 features");
    }
}
