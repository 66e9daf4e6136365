//! # CureCast Core
//!
//! Core prediction logic for the CureCast disease predictor.
//!
//! This crate contains the inference-and-enrichment pipeline:
//! - Symptom vocabulary and binary feature encoding
//! - Trained artifact loading and the classifiers it can describe
//! - Disease catalog construction with severity and specialist annotation
//! - Ranking, top-K truncation and catalog enrichment of predictions
//!
//! **No API concerns**: HTTP servers, routing and CORS belong in `api-rest`; response
//! shapes belong in `api-shared`.

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod inference;
pub mod models;
pub mod pipeline;
pub mod vocabulary;

pub use artifact::{LabelEncoder, TrainedArtifact};
pub use catalog::{DiseaseCatalog, DiseaseCatalogEntry};
pub use config::CoreConfig;
pub use constants::{DEFAULT_ARTIFACT_PATH, DEFAULT_DISEASE_CSV_PATH, TOP_K};
pub use curecast_types::{NonEmptyText, Severity};
pub use error::{CoreError, CoreResult};
pub use features::{vectorize, FeatureVector};
pub use inference::{InferenceAdapter, PredictionCandidate};
pub use models::Classifier;
pub use pipeline::{EnrichedResult, PredictionService};
pub use vocabulary::SymptomVocabulary;
