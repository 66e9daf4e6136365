//! Constants used throughout the CureCast core crate.
//!
//! The severity and specialist tables live here so that they are declared exactly once.

use curecast_types::Severity;

/// Default location of the trained model artifact when no path is configured.
pub const DEFAULT_ARTIFACT_PATH: &str = "curecast_model.json";

/// Default location of the disease reference table when no path is configured.
pub const DEFAULT_DISEASE_CSV_PATH: &str = "disease_list_with_counts.csv";

/// Number of ranked candidates returned by a prediction.
pub const TOP_K: usize = 3;

/// Specialist recommended when no keyword matches, or when a disease is not in the catalog.
pub const DEFAULT_SPECIALIST: &str = "General Physician";

/// Column holding the disease display name in the reference table.
pub const DISEASE_COLUMN: &str = "Disease";

/// Column holding the training sample count in the reference table.
pub const SAMPLE_COUNT_COLUMN: &str = "Sample_Count";

/// Exact-match severity overrides keyed by lowercased disease name.
///
/// Anything not listed here is `Severity::Mild`.
pub const SEVERITY_OVERRIDES: &[(&str, Severity)] = &[
    ("heart attack", Severity::Severe),
    ("stroke", Severity::Severe),
    ("cancer", Severity::Severe),
    ("kidney failure", Severity::Severe),
    ("pneumonia", Severity::Severe),
    ("covid-19", Severity::Severe),
    ("diabetes", Severity::Moderate),
    ("hypertension", Severity::Moderate),
    ("asthma", Severity::Moderate),
    ("arthritis", Severity::Moderate),
    ("depression", Severity::Moderate),
    ("heart failure", Severity::Severe),
];

/// Substring keywords mapped to a specialist.
///
/// Scanned in declaration order and the first hit wins, so reordering this table changes
/// results (e.g. "heart" must stay ahead of "kidney" and "ear" after "heart").
pub const SPECIALIST_KEYWORDS: &[(&str, &str)] = &[
    ("heart", "Cardiologist"),
    ("cardio", "Cardiologist"),
    ("stroke", "Neurologist"),
    ("brain", "Neurologist"),
    ("lung", "Pulmonologist"),
    ("respiratory", "Pulmonologist"),
    ("asthma", "Pulmonologist"),
    ("pneumonia", "Pulmonologist"),
    ("kidney", "Nephrologist"),
    ("renal", "Nephrologist"),
    ("liver", "Hepatologist"),
    ("diabetes", "Endocrinologist"),
    ("thyroid", "Endocrinologist"),
    ("mental", "Psychiatrist"),
    ("depression", "Psychiatrist"),
    ("bone", "Orthopedic Surgeon"),
    ("fracture", "Orthopedic Surgeon"),
    ("skin", "Dermatologist"),
    ("dermatitis", "Dermatologist"),
    ("eye", "Ophthalmologist"),
    ("ear", "ENT Specialist"),
    ("sinus", "ENT Specialist"),
];
