//! The ordered symptom vocabulary a classifier was trained against.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// Ordered, duplicate-free list of symptom identifiers.
///
/// Position `i` is feature column `i`. The order is fixed at construction and must match the
/// column order used when the classifier was trained.
#[derive(Clone, Debug)]
pub struct SymptomVocabulary {
    symptoms: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Build a vocabulary, rejecting blank and duplicate entries.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArtifact` if the list is empty, contains a blank name, or
    /// names the same symptom twice.
    pub fn new(symptoms: Vec<String>) -> CoreResult<Self> {
        if symptoms.is_empty() {
            return Err(CoreError::InvalidArtifact {
                field: "symptoms",
                reason: "vocabulary cannot be empty".into(),
            });
        }

        let mut positions = HashMap::with_capacity(symptoms.len());
        for (idx, symptom) in symptoms.iter().enumerate() {
            if symptom.trim().is_empty() {
                return Err(CoreError::InvalidArtifact {
                    field: "symptoms",
                    reason: format!("entry {idx} is blank"),
                });
            }
            if positions.insert(symptom.clone(), idx).is_some() {
                return Err(CoreError::InvalidArtifact {
                    field: "symptoms",
                    reason: format!("duplicate symptom `{symptom}`"),
                });
            }
        }

        Ok(Self {
            symptoms,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Column index of `symptom`, if it is part of the vocabulary.
    ///
    /// Matching is exact; no case folding is applied.
    pub fn position(&self, symptom: &str) -> Option<usize> {
        self.positions.get(symptom).copied()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symptoms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(names: &[&str]) -> CoreResult<SymptomVocabulary> {
        SymptomVocabulary::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn positions_follow_declaration_order() {
        let v = vocab(&["fever", "cough", "fatigue"]).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.position("fever"), Some(0));
        assert_eq!(v.position("fatigue"), Some(2));
        assert_eq!(v.position("Fever"), None);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec!["fever", "cough", "fatigue"]);
    }

    #[test]
    fn rejects_duplicates() {
        let err = vocab(&["fever", "cough", "fever"]).expect_err("duplicate should fail");
        assert!(
            matches!(err, CoreError::InvalidArtifact { field: "symptoms", ref reason } if reason.contains("duplicate"))
        );
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(vocab(&[]).is_err());
        assert!(vocab(&["fever", "  "]).is_err());
    }
}
