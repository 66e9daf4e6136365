//! Classifiers that can be loaded from a trained artifact.
//!
//! Training happens offline; these types only evaluate parameters that were fitted
//! elsewhere. Every implementation is immutable after construction, which is what allows a
//! single instance to be shared across concurrent requests.

use crate::error::{CoreError, CoreResult};

/// Probability estimation over a fixed-width feature vector.
///
/// Implementors must be safe for concurrent read-only use: `predict_proba` takes `&self` and
/// may be called from many threads at once.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Width of the feature vectors this classifier accepts.
    fn n_features(&self) -> usize;

    /// Number of classes, and the length of every probability vector returned.
    fn n_classes(&self) -> usize;

    /// One probability per class, in class-index order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Inference` if `features` has the wrong width or contains
    /// non-finite values.
    fn predict_proba(&self, features: &[f32]) -> CoreResult<Vec<f64>>;
}

fn check_features(features: &[f32], expected: usize) -> CoreResult<()> {
    if features.len() != expected {
        return Err(CoreError::Inference(format!(
            "feature vector has {} columns, classifier expects {}",
            features.len(),
            expected
        )));
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(CoreError::Inference(
            "feature vector contains non-finite values".into(),
        ));
    }
    Ok(())
}

/// Numerically stable `exp(x - logsumexp(x))`.
fn normalize_log_scores(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn check_matrix(
    field: &'static str,
    matrix: &[Vec<f64>],
    rows: usize,
) -> CoreResult<usize> {
    if matrix.len() != rows {
        return Err(CoreError::InvalidArtifact {
            field,
            reason: format!("expected {rows} rows, found {}", matrix.len()),
        });
    }
    let cols = matrix.first().map(Vec::len).unwrap_or(0);
    if cols == 0 {
        return Err(CoreError::InvalidArtifact {
            field,
            reason: "rows cannot be empty".into(),
        });
    }
    for (idx, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(CoreError::InvalidArtifact {
                field,
                reason: format!("row {idx} has {} columns, expected {cols}", row.len()),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::InvalidArtifact {
                field,
                reason: format!("row {idx} contains non-finite values"),
            });
        }
    }
    Ok(cols)
}

/// Multinomial logistic regression: `softmax(W·x + b)`.
#[derive(Clone, Debug)]
pub struct SoftmaxLinear {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    n_features: usize,
}

impl SoftmaxLinear {
    /// `weights` is one row per class, one column per feature; `bias` is one value per class.
    pub fn new(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> CoreResult<Self> {
        if bias.is_empty() {
            return Err(CoreError::InvalidArtifact {
                field: "model.bias",
                reason: "at least one class is required".into(),
            });
        }
        if bias.iter().any(|b| !b.is_finite()) {
            return Err(CoreError::InvalidArtifact {
                field: "model.bias",
                reason: "contains non-finite values".into(),
            });
        }
        let n_features = check_matrix("model.weights", &weights, bias.len())?;
        Ok(Self {
            weights,
            bias,
            n_features,
        })
    }
}

impl Classifier for SoftmaxLinear {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.bias.len()
    }

    fn predict_proba(&self, features: &[f32]) -> CoreResult<Vec<f64>> {
        check_features(features, self.n_features)?;

        let logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| {
                row.iter()
                    .zip(features)
                    .map(|(w, x)| w * f64::from(*x))
                    .sum::<f64>()
                    + bias
            })
            .collect();

        Ok(normalize_log_scores(&logits))
    }
}

/// Bernoulli naive Bayes over binary symptom presence.
///
/// `feature_log_prob[c][j]` is `ln P(symptom j present | class c)`. Absence contributes
/// `ln(1 - P)`, which is precomputed at construction.
#[derive(Clone, Debug)]
pub struct BernoulliNaiveBayes {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    feature_log_absent: Vec<Vec<f64>>,
    n_features: usize,
}

impl BernoulliNaiveBayes {
    pub fn new(class_log_prior: Vec<f64>, feature_log_prob: Vec<Vec<f64>>) -> CoreResult<Self> {
        if class_log_prior.is_empty() {
            return Err(CoreError::InvalidArtifact {
                field: "model.class_log_prior",
                reason: "at least one class is required".into(),
            });
        }
        if class_log_prior.iter().any(|p| !p.is_finite() || *p > 0.0) {
            return Err(CoreError::InvalidArtifact {
                field: "model.class_log_prior",
                reason: "log priors must be finite and <= 0".into(),
            });
        }
        let n_features = check_matrix(
            "model.feature_log_prob",
            &feature_log_prob,
            class_log_prior.len(),
        )?;
        // P must lie strictly inside (0, 1) so that ln(1 - P) stays finite.
        if feature_log_prob.iter().flatten().any(|lp| *lp >= 0.0) {
            return Err(CoreError::InvalidArtifact {
                field: "model.feature_log_prob",
                reason: "log probabilities must be < 0".into(),
            });
        }

        let feature_log_absent = feature_log_prob
            .iter()
            .map(|row| row.iter().map(|lp| (-lp.exp()).ln_1p()).collect())
            .collect();

        Ok(Self {
            class_log_prior,
            feature_log_prob,
            feature_log_absent,
            n_features,
        })
    }
}

impl Classifier for BernoulliNaiveBayes {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    fn predict_proba(&self, features: &[f32]) -> CoreResult<Vec<f64>> {
        check_features(features, self.n_features)?;

        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(self.feature_log_prob.iter().zip(&self.feature_log_absent))
            .map(|(prior, (present, absent))| {
                prior
                    + features
                        .iter()
                        .zip(present.iter().zip(absent))
                        .map(|(x, (p, a))| if *x > 0.0 { *p } else { *a })
                        .sum::<f64>()
            })
            .collect();

        Ok(normalize_log_scores(&joint))
    }
}
