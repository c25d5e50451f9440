//! Basic Classification Example
//!
//! Fits three of the classifiers on a small two-cluster dataset and prints
//! their predictions.

use ndarray::{array, Array1};
use linear_classifiers::{
    GaussianProcessClassifier, KernelType, LinearDiscriminantClassifier, LogisticRegression,
};

fn main() -> anyhow::Result<()> {
    // two clusters, bias column included for the linear models
    let x = array![
        [1.0, -2.1, -1.9],
        [1.0, -1.8, -2.2],
        [1.0, -2.0, -2.0],
        [1.0, -2.2, -1.8],
        [1.0, 1.9, 2.1],
        [1.0, 2.1, 1.8],
        [1.0, 2.0, 2.0],
        [1.0, 1.8, 2.2]
    ];
    let t = array![0usize, 0, 0, 0, 1, 1, 1, 1];
    println!("Dataset: {} samples, {} features", x.nrows(), x.ncols() - 1);

    // logistic regression, ridge-regularized IRLS
    let mut logistic = LogisticRegression::new().with_alpha(0.1);
    logistic.fit(&x, &t)?;
    println!("\nLogistic regression ({} iterations):", logistic.n_iter);
    println!("  predictions: {:?}", logistic.predict(&x)?.to_vec());
    println!("  accuracy:    {:.4}", logistic.score(&x, &t)?);

    // linear discriminant on the raw features (no bias column)
    let features = x.slice(ndarray::s![.., 1..]).to_owned();
    let mut lda = LinearDiscriminantClassifier::new();
    lda.fit(&features, &t)?;
    println!("\nLinear discriminant:");
    println!("  threshold:   {:.4}", lda.threshold.unwrap());
    println!("  predictions: {:?}", lda.predict(&features)?.to_vec());

    // gaussian process classifier on a 1-D slice of the data
    let x1d = Array1::from_vec(vec![-2.1, -1.8, -2.0, -2.2, 1.9, 2.1, 2.0, 1.8]);
    let mut gp = GaussianProcessClassifier::new(KernelType::Rbf { length_scale: 1.0 });
    gp.fit_1d(&x1d, &t)?;
    let proba = gp.predict_1d(&x1d)?;
    println!("\nGaussian process:");
    println!(
        "  class-1 probabilities: {:?}",
        proba.iter().map(|p| (p * 1000.0).round() / 1000.0).collect::<Vec<_>>()
    );

    Ok(())
}
