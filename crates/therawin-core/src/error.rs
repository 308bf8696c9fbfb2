use std::path::PathBuf;

use thiserror::Error;

/// Failures from a [`crate::KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store is read-only; refused to write '{key}'")]
    ReadOnly { key: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
