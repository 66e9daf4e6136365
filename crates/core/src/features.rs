//! Binary feature encoding of a symptom selection.

use crate::vocabulary::SymptomVocabulary;

/// Dense presence/absence vector aligned to a [`SymptomVocabulary`].
///
/// Every element is `0.0` or `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// All-absent vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of columns set to `1.0`.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|v| **v > 0.0).count()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Encode `selected` symptoms against `vocabulary`.
///
/// Unknown symptoms are ignored: names that are not in the vocabulary are dropped without
/// an error so clients may send tokens this model does not support. Selecting the same
/// symptom twice is the same as selecting it once, and an empty selection yields the
/// all-zero vector.
pub fn vectorize<I, S>(selected: I, vocabulary: &SymptomVocabulary) -> FeatureVector
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vector = FeatureVector::zeros(vocabulary.len());
    for symptom in selected {
        if let Some(idx) = vocabulary.position(symptom.as_ref()) {
            vector.0[idx] = 1.0;
        }
    }
    vector
}
