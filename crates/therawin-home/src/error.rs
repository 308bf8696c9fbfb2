use std::path::PathBuf;

use therawin_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("mood {0} is outside 1..=4")]
    InvalidMood(i64),

    #[error("malformed check-in record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("check-in save failed: {0}")]
    Save(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
