//! JSON wire types.

use curecast_core::{DiseaseCatalogEntry, EnrichedResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain status message returned by `GET /`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Error body returned for rejected or failed requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Health check response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Symptoms in the loaded vocabulary.
    pub symptoms: usize,
    /// Rows in the disease catalog.
    pub diseases: usize,
    /// Classes the model can predict.
    pub classes: usize,
    /// Cross-validated accuracy recorded by the training job.
    pub accuracy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictReq {
    /// Symptom names; names outside the vocabulary are ignored.
    pub symptoms: Vec<String>,
}

/// One ranked prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionRes {
    #[serde(rename = "Disease")]
    pub disease: String,
    #[serde(rename = "Percent")]
    pub percent: f64,
    #[serde(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "Specialist")]
    pub specialist: String,
    /// `null` when the disease is missing from the catalog.
    #[serde(rename = "Sample_Count")]
    pub sample_count: Option<u64>,
}

impl From<EnrichedResult> for PredictionRes {
    fn from(result: EnrichedResult) -> Self {
        Self {
            disease: result.disease,
            percent: result.percent,
            severity: result.severity,
            specialist: result.specialist,
            sample_count: result.sample_count,
        }
    }
}

/// One disease catalog row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiseaseRes {
    #[serde(rename = "Disease")]
    pub disease: String,
    #[serde(rename = "Disease_norm")]
    pub disease_norm: String,
    #[serde(rename = "Sample_Count")]
    pub sample_count: u64,
    #[serde(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "Specialist")]
    pub specialist: String,
}

impl From<&DiseaseCatalogEntry> for DiseaseRes {
    fn from(entry: &DiseaseCatalogEntry) -> Self {
        Self {
            disease: entry.display_name.clone(),
            disease_norm: entry.normalized_key.clone(),
            sample_count: entry.sample_count,
            severity: entry.severity.to_string(),
            specialist: entry.specialist.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prediction_serializes_missing_sample_count_as_null() {
        let res = PredictionRes::from(EnrichedResult {
            disease: "Cold".into(),
            percent: 20.0,
            severity: "Unknown".into(),
            specialist: "General Physician".into(),
            sample_count: None,
        });

        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({
                "Disease": "Cold",
                "Percent": 20.0,
                "Severity": "Unknown",
                "Specialist": "General Physician",
                "Sample_Count": null
            })
        );
    }

    #[test]
    fn disease_row_uses_catalog_column_names() {
        let catalog = curecast_core::DiseaseCatalog::build(vec![curecast_core::catalog::CatalogRow {
            disease: "Stroke".into(),
            sample_count: 950,
        }])
        .unwrap();

        let value = serde_json::to_value(DiseaseRes::from(&catalog.entries()[0])).unwrap();
        assert_eq!(
            value,
            json!({
                "Disease": "Stroke",
                "Disease_norm": "stroke",
                "Sample_Count": 950,
                "Severity": "Severe",
                "Specialist": "Neurologist"
            })
        );
    }

    #[test]
    fn predict_request_requires_symptoms() {
        assert!(serde_json::from_str::<PredictReq>("{}").is_err());
        assert!(serde_json::from_str::<PredictReq>(r#"{"symptoms": "fever"}"#).is_err());
        let req: PredictReq = serde_json::from_str(r#"{"symptoms": ["fever"]}"#).unwrap();
        assert_eq!(req.symptoms, vec!["fever"]);
    }
}
