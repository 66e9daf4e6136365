//! Disease reference catalog.
//!
//! Built once at startup from the disease reference table. Each row is annotated with a
//! severity and a specialist derived purely from its lowercased name, and the result is
//! read-only for the lifetime of the process.

use crate::constants::{
    DEFAULT_SPECIALIST, DISEASE_COLUMN, SAMPLE_COUNT_COLUMN, SEVERITY_OVERRIDES,
    SPECIALIST_KEYWORDS,
};
use crate::error::{CoreError, CoreResult};
use curecast_types::Severity;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One raw row of the disease reference table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CatalogRow {
    #[serde(rename = "Disease")]
    pub disease: String,
    #[serde(rename = "Sample_Count")]
    pub sample_count: u64,
}

/// A disease annotated with its derived severity and specialist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseCatalogEntry {
    pub display_name: String,
    /// Lowercased `display_name`; the join key for predictions.
    pub normalized_key: String,
    pub sample_count: u64,
    pub severity: Severity,
    pub specialist: &'static str,
}

impl DiseaseCatalogEntry {
    fn from_row(row: CatalogRow) -> Self {
        let normalized_key = normalize_disease_name(&row.disease);
        Self {
            severity: severity_for(&normalized_key),
            specialist: specialist_for(&normalized_key),
            display_name: row.disease,
            normalized_key,
            sample_count: row.sample_count,
        }
    }
}

/// Lowercase a disease name into its catalog join key.
///
/// Only case is folded. Names differing in whitespace produce different keys.
pub fn normalize_disease_name(name: &str) -> String {
    name.to_lowercase()
}

/// Severity for a normalized disease key.
pub fn severity_for(normalized_key: &str) -> Severity {
    SEVERITY_OVERRIDES
        .iter()
        .find(|(key, _)| *key == normalized_key)
        .map(|(_, severity)| *severity)
        .unwrap_or_default()
}

/// Specialist for a normalized disease key: first keyword contained in the key wins.
pub fn specialist_for(normalized_key: &str) -> &'static str {
    SPECIALIST_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized_key.contains(keyword))
        .map(|(_, specialist)| *specialist)
        .unwrap_or(DEFAULT_SPECIALIST)
}

/// Read-only disease table keyed by normalized name.
#[derive(Clone, Debug, Default)]
pub struct DiseaseCatalog {
    entries: Vec<DiseaseCatalogEntry>,
    index: HashMap<String, usize>,
}

impl DiseaseCatalog {
    /// Build the catalog from raw rows.
    ///
    /// Rows whose names lowercase to the same key collide; the later row replaces the earlier
    /// one in place so the listing and lookups stay consistent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if a row has a blank disease name.
    pub fn build(rows: impl IntoIterator<Item = CatalogRow>) -> CoreResult<Self> {
        let mut catalog = Self::default();

        for (row_number, row) in rows.into_iter().enumerate() {
            if row.disease.trim().is_empty() {
                return Err(CoreError::InvalidInput(format!(
                    "disease catalog row {} has an empty {DISEASE_COLUMN}",
                    row_number + 1
                )));
            }

            let entry = DiseaseCatalogEntry::from_row(row);
            match catalog.index.get(&entry.normalized_key) {
                Some(&existing) => {
                    tracing::warn!(
                        "disease catalog key collision on '{}': '{}' replaces '{}'",
                        entry.normalized_key,
                        entry.display_name,
                        catalog.entries[existing].display_name
                    );
                    catalog.entries[existing] = entry;
                }
                None => {
                    catalog
                        .index
                        .insert(entry.normalized_key.clone(), catalog.entries.len());
                    catalog.entries.push(entry);
                }
            }
        }

        Ok(catalog)
    }

    /// Parse the reference table from CSV text.
    ///
    /// Header names are trimmed before matching and columns other than `Disease` and
    /// `Sample_Count` are ignored.
    pub fn from_reader<R: Read>(reader: R) -> CoreResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for required in [DISEASE_COLUMN, SAMPLE_COUNT_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(CoreError::MissingCatalogColumn(required));
            }
        }

        let rows = csv_reader
            .deserialize::<CatalogRow>()
            .collect::<Result<Vec<_>, _>>()?;

        Self::build(rows)
    }

    /// Load the reference table from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> CoreResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| CoreError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Look up an entry by its normalized key.
    pub fn lookup(&self, normalized_key: &str) -> Option<&DiseaseCatalogEntry> {
        self.index
            .get(normalized_key)
            .map(|&idx| &self.entries[idx])
    }

    /// Entries in the order their keys first appeared in the source table.
    pub fn entries(&self) -> &[DiseaseCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
