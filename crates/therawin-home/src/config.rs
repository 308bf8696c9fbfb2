use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Timings and the storage key for the home tab. Every field is optional in
/// the JSON form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub storage_key: String,
    pub cooldown_ms: i64,
    pub cooldown_tick_ms: i64,
    pub theme_tick_ms: i64,
    pub feedback_window_ms: i64,
    pub save_delay_ms: i64,
    pub sun_transition_ms: u64,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            storage_key: "lastMoodCheckIn".to_string(),
            cooldown_ms: crate::cooldown::DEFAULT_COOLDOWN_MS,
            cooldown_tick_ms: 60_000,
            theme_tick_ms: 60_000,
            feedback_window_ms: 2_000,
            save_delay_ms: 500,
            sun_transition_ms: 1_000,
        }
    }
}

impl HomeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
