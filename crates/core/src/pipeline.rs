//! Ranking and enrichment of predictions.
//!
//! [`PredictionService`] is the application context for prediction: it owns the vocabulary,
//! the disease catalog and the inference adapter, all built once at startup and never
//! mutated afterwards. Each call to [`PredictionService::predict`] is an independent
//! computation over that shared state.

use crate::artifact::TrainedArtifact;
use crate::catalog::{normalize_disease_name, DiseaseCatalog};
use crate::config::CoreConfig;
use crate::constants::{DEFAULT_SPECIALIST, TOP_K};
use crate::error::CoreResult;
use crate::features::vectorize;
use crate::inference::{InferenceAdapter, PredictionCandidate};
use crate::vocabulary::SymptomVocabulary;
use curecast_types::Severity;

/// A ranked prediction joined with catalog metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedResult {
    pub disease: String,
    /// Probability scaled to `[0, 100]`, unrounded.
    pub percent: f64,
    /// Catalog severity, or `"Unknown"` when the disease is not in the catalog.
    pub severity: String,
    pub specialist: String,
    /// `None` when the disease is not in the catalog.
    pub sample_count: Option<u64>,
}

/// Sort by probability descending, keeping class-index order among ties, and keep the top
/// `k` candidates.
pub fn rank_candidates(
    mut candidates: Vec<PredictionCandidate>,
    k: usize,
) -> Vec<PredictionCandidate> {
    // sort_by is stable; -0.0 and 0.0 compare equal
    candidates.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(k);
    candidates
}

/// Join a ranked candidate against the catalog, filling defaults on a miss.
pub fn enrich(candidate: PredictionCandidate, catalog: &DiseaseCatalog) -> EnrichedResult {
    let percent = candidate.probability * 100.0;
    match catalog.lookup(&normalize_disease_name(&candidate.disease_name)) {
        Some(entry) => EnrichedResult {
            disease: candidate.disease_name,
            percent,
            severity: entry.severity.to_string(),
            specialist: entry.specialist.to_string(),
            sample_count: Some(entry.sample_count),
        },
        None => EnrichedResult {
            disease: candidate.disease_name,
            percent,
            severity: Severity::UNKNOWN_LABEL.to_string(),
            specialist: DEFAULT_SPECIALIST.to_string(),
            sample_count: None,
        },
    }
}

/// Shared, read-only prediction context.
#[derive(Clone, Debug)]
pub struct PredictionService {
    vocabulary: SymptomVocabulary,
    catalog: DiseaseCatalog,
    adapter: InferenceAdapter,
    accuracy: Option<f64>,
}

impl PredictionService {
    pub fn new(artifact: TrainedArtifact, catalog: DiseaseCatalog) -> Self {
        Self {
            adapter: InferenceAdapter::new(artifact.classifier, artifact.label_encoder),
            vocabulary: artifact.vocabulary,
            accuracy: artifact.accuracy,
            catalog,
        }
    }

    /// Load the artifact and the disease catalog named by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if either input cannot be read or fails validation.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        let artifact = TrainedArtifact::load(cfg.artifact_path())?;
        let catalog = DiseaseCatalog::from_csv_path(cfg.disease_csv_path())?;

        tracing::info!(
            "loaded {} symptoms and {} classes from {}",
            artifact.vocabulary.len(),
            artifact.label_encoder.len(),
            cfg.artifact_path().display()
        );
        tracing::info!(
            "loaded {} diseases from {}",
            catalog.len(),
            cfg.disease_csv_path().display()
        );
        if let Some(accuracy) = artifact.accuracy {
            tracing::info!("model cross-validated accuracy: {:.4}", accuracy);
        }

        Ok(Self::new(artifact, catalog))
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    pub fn n_classes(&self) -> usize {
        self.adapter.n_classes()
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Predict the most likely diseases for `symptoms`.
    ///
    /// An empty selection returns an empty list without running the classifier. Otherwise
    /// the classifier always runs, even when none of the symptoms are known, and up to
    /// [`TOP_K`] results are returned in descending probability order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Inference` if the classifier fails; no partial result is produced.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> CoreResult<Vec<EnrichedResult>> {
        if symptoms.is_empty() {
            return Ok(Vec::new());
        }

        let vector = vectorize(symptoms, &self.vocabulary);
        tracing::debug!(
            "vectorized {} of {} requested symptoms",
            vector.active_count(),
            symptoms.len()
        );

        let candidates = self.adapter.infer(&vector)?;

        Ok(rank_candidates(candidates, TOP_K)
            .into_iter()
            .map(|candidate| enrich(candidate, &self.catalog))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::LabelEncoder;
    use crate::catalog::CatalogRow;
    use crate::error::CoreError;
    use crate::models::Classifier;
    use curecast_types::NonEmptyText;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns fixed probabilities and counts how often it was called.
    #[derive(Debug)]
    struct Scripted {
        proba: Vec<f64>,
        width: usize,
        calls: AtomicUsize,
        fail: bool,
    }

    impl Scripted {
        fn new(proba: Vec<f64>, width: usize) -> Arc<Self> {
            Arc::new(Self {
                proba,
                width,
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }
    }

    impl Classifier for Scripted {
        fn n_features(&self) -> usize {
            self.width
        }

        fn n_classes(&self) -> usize {
            self.proba.len()
        }

        fn predict_proba(&self, features: &[f32]) -> CoreResult<Vec<f64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CoreError::Inference("scripted failure".into()));
            }
            assert_eq!(features.len(), self.width);
            Ok(self.proba.clone())
        }
    }

    fn service(classifier: Arc<Scripted>, classes: &[&str]) -> PredictionService {
        let vocabulary =
            SymptomVocabulary::new(vec!["fever".into(), "cough".into(), "fatigue".into()])
                .unwrap();
        let label_encoder = LabelEncoder::new(
            classes
                .iter()
                .map(|c| NonEmptyText::new(c).unwrap())
                .collect(),
        )
        .unwrap();
        let artifact = TrainedArtifact::new(classifier, label_encoder, vocabulary, None).unwrap();
        let catalog = DiseaseCatalog::build(vec![CatalogRow {
            disease: "Flu".into(),
            sample_count: 500,
        }])
        .unwrap();
        PredictionService::new(artifact, catalog)
    }

    fn candidate(name: &str, probability: f64) -> PredictionCandidate {
        PredictionCandidate {
            disease_name: name.into(),
            probability,
        }
    }

    #[test]
    fn flu_cold_allergy_scenario() {
        let svc = service(
            Scripted::new(vec![0.7, 0.2, 0.1], 3),
            &["Flu", "Cold", "Allergy"],
        );

        let results = svc.predict(&["fever", "cough"]).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].disease, "Flu");
        assert!((results[0].percent - 70.0).abs() < 1e-9);
        assert_eq!(results[0].severity, "Mild");
        assert_eq!(results[0].specialist, "General Physician");
        assert_eq!(results[0].sample_count, Some(500));

        assert_eq!(results[1].disease, "Cold");
        assert!((results[1].percent - 20.0).abs() < 1e-9);
        assert_eq!(results[1].severity, "Unknown");
        assert_eq!(results[1].specialist, "General Physician");
        assert_eq!(results[1].sample_count, None);

        assert_eq!(results[2].disease, "Allergy");
        assert!((results[2].percent - 10.0).abs() < 1e-9);
        assert_eq!(results[2].sample_count, None);
    }

    #[test]
    fn empty_selection_skips_inference() {
        let classifier = Scripted::new(vec![0.5, 0.5], 3);
        let svc = service(classifier.clone(), &["Flu", "Cold"]);

        let results = svc.predict::<&str>(&[]).unwrap();

        assert!(results.is_empty());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_only_selection_still_runs_inference() {
        let classifier = Scripted::new(vec![0.6, 0.4], 3);
        let svc = service(classifier.clone(), &["Flu", "Cold"]);

        let results = svc.predict(&["nonexistent_symptom"]).unwrap();

        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].disease, "Flu");
    }

    #[test]
    fn truncates_to_top_three_sorted_descending() {
        let svc = service(
            Scripted::new(vec![0.05, 0.4, 0.1, 0.3, 0.15], 3),
            &["A", "B", "C", "D", "E"],
        );

        let results = svc.predict(&["fever"]).unwrap();

        let names: Vec<_> = results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "E"]);
        assert!(results.windows(2).all(|w| w[0].percent >= w[1].percent));
    }

    #[test]
    fn ties_keep_lower_class_index_first() {
        let ranked = rank_candidates(
            vec![
                candidate("A", 0.2),
                candidate("B", 0.4),
                candidate("C", 0.4),
                candidate("D", 0.0),
            ],
            TOP_K,
        );
        let names: Vec<_> = ranked.iter().map(|c| c.disease_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn signed_zero_probabilities_tie() {
        let ranked = rank_candidates(
            vec![
                candidate("A", 1.0),
                candidate("B", -0.0),
                candidate("C", 0.0),
                candidate("D", 0.0),
            ],
            TOP_K,
        );
        let names: Vec<_> = ranked.iter().map(|c| c.disease_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn rank_keeps_all_when_fewer_than_k() {
        let ranked = rank_candidates(vec![candidate("A", 0.3), candidate("B", 0.7)], TOP_K);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].disease_name, "B");
    }

    #[test]
    fn enrich_joins_case_insensitively() {
        let catalog = DiseaseCatalog::build(vec![CatalogRow {
            disease: "Heart Failure".into(),
            sample_count: 77,
        }])
        .unwrap();

        let result = enrich(candidate("heart failure", 0.25), &catalog);

        assert_eq!(result.disease, "heart failure");
        assert_eq!(result.severity, "Severe");
        assert_eq!(result.specialist, "Cardiologist");
        assert_eq!(result.sample_count, Some(77));
        assert!((result.percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn predict_is_idempotent() {
        let svc = service(
            Scripted::new(vec![0.25, 0.25, 0.5], 3),
            &["Flu", "Cold", "Allergy"],
        );
        let first = svc.predict(&["fatigue"]).unwrap();
        let second = svc.predict(&["fatigue"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_result_has_known_severity_and_specialist() {
        let svc = service(
            Scripted::new(vec![0.1, 0.2, 0.3, 0.4], 3),
            &["Flu", "Asthma", "Stroke", "Liver Cirrhosis"],
        );
        for result in svc.predict(&["cough"]).unwrap() {
            assert!(["Mild", "Moderate", "Severe", "Unknown"].contains(&result.severity.as_str()));
            assert!(!result.specialist.is_empty());
        }
    }

    #[test]
    fn inference_failure_fails_the_request() {
        let classifier = Arc::new(Scripted {
            proba: vec![0.5, 0.5],
            width: 3,
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let svc = service(classifier, &["Flu", "Cold"]);

        let err = svc.predict(&["fever"]).expect_err("should fail");
        assert!(matches!(err, CoreError::Inference(_)));
    }

    #[test]
    fn from_config_loads_both_inputs() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact_path = dir.path().join("model.json");
        let csv_path = dir.path().join("diseases.csv");
        std::fs::write(
            &artifact_path,
            r#"{
                "model": { "kind": "softmax_linear",
                           "weights": [[2.0, 0.0], [0.0, 2.0]], "bias": [0.0, 0.0] },
                "label_encoder": { "classes": ["Flu", "Asthma"] },
                "symptoms": ["fever", "wheezing"]
            }"#,
        )
        .unwrap();
        std::fs::write(&csv_path, "Disease,Sample_Count\nFlu,500\nAsthma,320\n").unwrap();

        let cfg = CoreConfig::new(artifact_path, csv_path).unwrap();
        let svc = PredictionService::from_config(&cfg).expect("service loads");

        assert_eq!(svc.vocabulary().len(), 2);
        assert_eq!(svc.catalog().len(), 2);
        assert_eq!(svc.n_classes(), 2);

        let results = svc.predict(&["wheezing"]).unwrap();
        assert_eq!(results[0].disease, "Asthma");
        assert_eq!(results[0].severity, "Moderate");
        assert_eq!(results[0].specialist, "Pulmonologist");
        assert_eq!(results[0].sample_count, Some(320));
    }
}
