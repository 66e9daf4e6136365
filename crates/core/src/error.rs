use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read model artifact {path}: {source}", path = path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact schema mismatch at {path}: {source}")]
    ArtifactParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact field `{field}`: {reason}")]
    InvalidArtifact { field: &'static str, reason: String },
    #[error("failed to read disease catalog {path}: {source}", path = path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse disease catalog: {0}")]
    CatalogParse(#[from] csv::Error),
    #[error("disease catalog is missing required column `{0}`")]
    MissingCatalogColumn(&'static str),
    #[error("inference failed: {0}")]
    Inference(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
