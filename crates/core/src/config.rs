//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in the request path reads environment variables.

use crate::constants::{DEFAULT_ARTIFACT_PATH, DEFAULT_DISEASE_CSV_PATH};
use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    artifact_path: PathBuf,
    disease_csv_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if either path is empty.
    pub fn new(artifact_path: PathBuf, disease_csv_path: PathBuf) -> CoreResult<Self> {
        if artifact_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "artifact path cannot be empty".into(),
            ));
        }
        if disease_csv_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "disease catalog path cannot be empty".into(),
            ));
        }

        Ok(Self {
            artifact_path,
            disease_csv_path,
        })
    }

    /// Build a configuration from optional raw values, falling back to the defaults.
    pub fn from_env_values(
        artifact_path: Option<String>,
        disease_csv_path: Option<String>,
    ) -> CoreResult<Self> {
        Self::new(
            path_from_env_value(artifact_path, DEFAULT_ARTIFACT_PATH),
            path_from_env_value(disease_csv_path, DEFAULT_DISEASE_CSV_PATH),
        )
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub fn disease_csv_path(&self) -> &Path {
        &self.disease_csv_path
    }
}

/// Parse a path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn path_from_env_value(value: Option<String>, default: &str) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = CoreConfig::from_env_values(None, Some("   ".into())).unwrap();
        assert_eq!(cfg.artifact_path(), Path::new(DEFAULT_ARTIFACT_PATH));
        assert_eq!(cfg.disease_csv_path(), Path::new(DEFAULT_DISEASE_CSV_PATH));
    }

    #[test]
    fn explicit_values_are_trimmed() {
        let cfg =
            CoreConfig::from_env_values(Some(" /models/a.json ".into()), Some("d.csv".into()))
                .unwrap();
        assert_eq!(cfg.artifact_path(), Path::new("/models/a.json"));
        assert_eq!(cfg.disease_csv_path(), Path::new("d.csv"));
    }

    #[test]
    fn new_rejects_empty_paths() {
        let err = CoreConfig::new(PathBuf::new(), PathBuf::from("d.csv")).expect_err("empty");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("artifact")));
    }
}
