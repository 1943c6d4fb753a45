use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppStoreError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML metadata in {}: {source}", .path.display())]
    YamlMetadata {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Invalid JSON metadata in {}: {source}", .path.display())]
    JsonMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppStoreError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppStoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppStoreError>;
