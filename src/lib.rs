//! Classical linear and kernel classifiers on dense feature matrices
//!
//! This crate provides a small family of classification algorithms that share
//! one data model: an `(n_samples, n_features)` matrix of `f64` features and a
//! vector of 0-indexed, contiguous integer class labels.
//!
//! # Modules
//!
//! ## Classifiers
//! - [`least_squares`] - Closed-form multi-class classification via one-hot regression
//! - [`linear_discriminant`] - Binary Fisher discriminant with a Gaussian-overlap threshold
//! - [`logistic`] - Binary logistic regression fit by Newton-Raphson IRLS
//! - [`multinomial`] - K-class logistic regression with per-class Hessian blocks
//! - [`bayesian_logistic`] - Laplace-approximated logistic regression with a probit-corrected predictive
//! - [`gaussian_process`] - Kernelized classifier predicting the sigmoid of a posterior mean
//!
//! ## Support
//! - [`error`] - Error types and the crate [`Result`] alias
//! - [`kernel`] - Kernel functions and Gram-matrix computation
//! - [`labels`] - Class-label validation and one-hot encoding
//! - [`stats`] - Gaussian summary statistics for projected samples
//!
//! Every estimator follows the same lifecycle: construct with hyperparameters,
//! `fit` on `(X, t)`, then call the prediction methods any number of times.
//! Re-fitting overwrites the fitted state in place.

// Core error handling
pub mod error;

// Support modules
pub mod kernel;
pub mod labels;
mod linalg;
pub mod stats;

// Classifiers
pub mod bayesian_logistic;
pub mod gaussian_process;
pub mod least_squares;
pub mod linear_discriminant;
pub mod logistic;
pub mod multinomial;

pub use error::{ClassifierError, Result};
pub use kernel::KernelType;
pub use stats::GaussianSummary;

pub use bayesian_logistic::BayesianLogisticRegression;
pub use gaussian_process::GaussianProcessClassifier;
pub use least_squares::LeastSquaresClassifier;
pub use linear_discriminant::LinearDiscriminantClassifier;
pub use logistic::LogisticRegression;
pub use multinomial::MultinomialLogisticRegression;
