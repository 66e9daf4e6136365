//! Inference adapter around an opaque classifier.

use crate::artifact::LabelEncoder;
use crate::error::{CoreError, CoreResult};
use crate::features::FeatureVector;
use crate::models::Classifier;
use std::sync::Arc;

/// A disease name paired with the probability the classifier assigned to it.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionCandidate {
    pub disease_name: String,
    pub probability: f64,
}

/// Runs a classifier and decodes its class indices.
///
/// The adapter passes probabilities through exactly as reported: it does not retry,
/// renormalise or fall back to another model. Sharing it between threads relies on the
/// wrapped [`Classifier`] being safe for concurrent read-only use.
#[derive(Clone, Debug)]
pub struct InferenceAdapter {
    classifier: Arc<dyn Classifier>,
    label_encoder: LabelEncoder,
}

impl InferenceAdapter {
    pub fn new(classifier: Arc<dyn Classifier>, label_encoder: LabelEncoder) -> Self {
        Self {
            classifier,
            label_encoder,
        }
    }

    pub fn n_classes(&self) -> usize {
        self.label_encoder.len()
    }

    /// One candidate per class, in the classifier's class-index order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Inference` if the classifier fails, returns a probability count
    /// that does not match the label encoder, or reports a probability outside `[0, 1]`.
    pub fn infer(&self, vector: &FeatureVector) -> CoreResult<Vec<PredictionCandidate>> {
        let proba = self.classifier.predict_proba(vector.as_slice())?;

        if proba.len() != self.label_encoder.len() {
            return Err(CoreError::Inference(format!(
                "classifier returned {} probabilities for {} classes",
                proba.len(),
                self.label_encoder.len()
            )));
        }

        proba
            .into_iter()
            .enumerate()
            .map(|(idx, probability)| {
                if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
                    return Err(CoreError::Inference(format!(
                        "classifier returned invalid probability {probability} for class {idx}"
                    )));
                }
                let disease_name = self
                    .label_encoder
                    .decode(idx)
                    .ok_or_else(|| CoreError::Inference(format!("no label for class {idx}")))?;
                Ok(PredictionCandidate {
                    disease_name: disease_name.to_string(),
                    probability,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curecast_types::NonEmptyText;

    #[derive(Debug)]
    struct Fixed(Vec<f64>);

    impl Classifier for Fixed {
        fn n_features(&self) -> usize {
            2
        }

        fn n_classes(&self) -> usize {
            self.0.len()
        }

        fn predict_proba(&self, features: &[f32]) -> CoreResult<Vec<f64>> {
            if features.len() != 2 {
                return Err(CoreError::Inference("bad width".into()));
            }
            Ok(self.0.clone())
        }
    }

    fn encoder(names: &[&str]) -> LabelEncoder {
        LabelEncoder::new(names.iter().map(|n| NonEmptyText::new(n).unwrap()).collect()).unwrap()
    }

    #[test]
    fn decodes_in_class_index_order_without_renormalising() {
        let adapter = InferenceAdapter::new(
            Arc::new(Fixed(vec![0.1, 0.5, 0.3])),
            encoder(&["Allergy", "Cold", "Flu"]),
        );
        let candidates = adapter.infer(&FeatureVector::zeros(2)).unwrap();

        let names: Vec<_> = candidates.iter().map(|c| c.disease_name.as_str()).collect();
        assert_eq!(names, vec!["Allergy", "Cold", "Flu"]);
        // sums to 0.9 and is passed through untouched
        assert_eq!(candidates[1].probability, 0.5);
        assert_eq!(candidates[2].probability, 0.3);
    }

    #[test]
    fn classifier_failure_propagates() {
        let adapter = InferenceAdapter::new(Arc::new(Fixed(vec![1.0])), encoder(&["Flu"]));
        let err = adapter.infer(&FeatureVector::zeros(5)).expect_err("bad width");
        assert!(matches!(err, CoreError::Inference(_)));
    }

    #[test]
    fn probability_count_mismatch_is_an_error() {
        let adapter = InferenceAdapter::new(Arc::new(Fixed(vec![0.5, 0.5])), encoder(&["Flu"]));
        let err = adapter.infer(&FeatureVector::zeros(2)).expect_err("mismatch");
        assert!(matches!(err, CoreError::Inference(msg) if msg.contains("2 probabilities")));
    }

    #[test]
    fn non_finite_probability_is_an_error() {
        let adapter =
            InferenceAdapter::new(Arc::new(Fixed(vec![f64::NAN])), encoder(&["Flu"]));
        assert!(adapter.infer(&FeatureVector::zeros(2)).is_err());
    }
}
