//! Trained model artifact loading.
//!
//! The offline training job writes a single JSON document holding the fitted classifier,
//! the label encoder and the ordered symptom vocabulary. This module parses that document
//! into a strict wire model and then validates it into a [`TrainedArtifact`], so a
//! malformed artifact fails at startup rather than on the first request.
//!
//! ```json
//! {
//!   "model": { "kind": "softmax_linear", "weights": [[0.1, 0.2]], "bias": [0.0] },
//!   "label_encoder": { "classes": ["Flu"] },
//!   "symptoms": ["fever", "cough"],
//!   "accuracy": 0.93
//! }
//! ```

use crate::error::{CoreError, CoreResult};
use crate::models::{BernoulliNaiveBayes, Classifier, SoftmaxLinear};
use crate::vocabulary::SymptomVocabulary;
use curecast_types::NonEmptyText;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ArtifactWire {
    model: ModelWire,
    label_encoder: LabelEncoderWire,
    #[serde(default)]
    symptoms: Option<Vec<String>>,
    #[serde(default)]
    features: Option<Vec<String>>,
    #[serde(default)]
    accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelWire {
    SoftmaxLinear {
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
    BernoulliNaiveBayes {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelEncoderWire {
    classes: Vec<NonEmptyText>,
}

// ============================================================================
// Domain types
// ============================================================================

/// Decodes class indices into disease names.
#[derive(Clone, Debug)]
pub struct LabelEncoder {
    classes: Vec<NonEmptyText>,
}

impl LabelEncoder {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArtifact` if `classes` is empty or has duplicates.
    pub fn new(classes: Vec<NonEmptyText>) -> CoreResult<Self> {
        if classes.is_empty() {
            return Err(CoreError::InvalidArtifact {
                field: "label_encoder.classes",
                reason: "at least one class is required".into(),
            });
        }
        let mut seen = HashSet::with_capacity(classes.len());
        for class in &classes {
            if !seen.insert(class.as_str()) {
                return Err(CoreError::InvalidArtifact {
                    field: "label_encoder.classes",
                    reason: format!("duplicate class `{class}`"),
                });
            }
        }
        Ok(Self { classes })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Disease name for class index `idx`.
    pub fn decode(&self, idx: usize) -> Option<&str> {
        self.classes.get(idx).map(NonEmptyText::as_str)
    }
}

/// A validated trained artifact, ready to serve predictions.
#[derive(Clone, Debug)]
pub struct TrainedArtifact {
    pub classifier: Arc<dyn Classifier>,
    pub label_encoder: LabelEncoder,
    pub vocabulary: SymptomVocabulary,
    /// Cross-validated accuracy reported by the training job, if recorded.
    pub accuracy: Option<f64>,
}

impl TrainedArtifact {
    /// Assemble an artifact from already-constructed parts, checking that their shapes agree.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArtifact` if the classifier's feature width differs from the
    /// vocabulary length or its class count differs from the label encoder.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        label_encoder: LabelEncoder,
        vocabulary: SymptomVocabulary,
        accuracy: Option<f64>,
    ) -> CoreResult<Self> {
        if classifier.n_features() != vocabulary.len() {
            return Err(CoreError::InvalidArtifact {
                field: "model",
                reason: format!(
                    "model expects {} features but vocabulary has {} symptoms",
                    classifier.n_features(),
                    vocabulary.len()
                ),
            });
        }
        if classifier.n_classes() != label_encoder.len() {
            return Err(CoreError::InvalidArtifact {
                field: "model",
                reason: format!(
                    "model has {} classes but label encoder has {}",
                    classifier.n_classes(),
                    label_encoder.len()
                ),
            });
        }
        if let Some(acc) = accuracy {
            if !(0.0..=1.0).contains(&acc) {
                return Err(CoreError::InvalidArtifact {
                    field: "accuracy",
                    reason: format!("{acc} is outside [0, 1]"),
                });
            }
        }

        Ok(Self {
            classifier,
            label_encoder,
            vocabulary,
            accuracy,
        })
    }

    /// Parse and validate an artifact from JSON text.
    ///
    /// This uses `serde_path_to_error` so a schema mismatch names the offending field
    /// (e.g. `label_encoder.classes[2]`).
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let wire: ArtifactWire = serde_path_to_error::deserialize(&mut deserializer).map_err(
            |err| {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                CoreError::ArtifactParse {
                    path,
                    source: err.into_inner(),
                }
            },
        )?;
        deserializer
            .end()
            .map_err(|source| CoreError::ArtifactParse {
                path: "<root>".into(),
                source,
            })?;

        let classifier: Arc<dyn Classifier> = match wire.model {
            ModelWire::SoftmaxLinear { weights, bias } => {
                Arc::new(SoftmaxLinear::new(weights, bias)?)
            }
            ModelWire::BernoulliNaiveBayes {
                class_log_prior,
                feature_log_prob,
            } => Arc::new(BernoulliNaiveBayes::new(class_log_prior, feature_log_prob)?),
        };

        // `features` is read only when `symptoms` is absent or empty
        let symptoms = wire
            .symptoms
            .filter(|symptoms| !symptoms.is_empty())
            .or(wire.features)
            .unwrap_or_default();

        Self::new(
            classifier,
            LabelEncoder::new(wire.label_encoder.classes)?,
            SymptomVocabulary::new(symptoms)?,
            wire.accuracy,
        )
    }

    /// Read, parse and validate an artifact file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
