/// Studio configuration, loaded from RON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::beat_board::SEED_BEATS;
use crate::core::file_io::PdfSettings;
use crate::core::suggest::SuggestionSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid key binding: {0}")]
    InvalidBinding(String),
}

/// Everything a session can be tuned with. Missing fields take their
/// defaults, so an empty `()` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub seed_beats: Vec<String>,
    pub suggestion: SuggestionSettings,
    pub pdf: PdfSettings,
    /// Chord → action name overrides, e.g. `"ctrl+d": "toggle_dark_mode"`.
    pub key_bindings: BTreeMap<String, String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            seed_beats: SEED_BEATS.iter().map(|s| s.to_string()).collect(),
            suggestion: SuggestionSettings::default(),
            pdf: PdfSettings::default(),
            key_bindings: BTreeMap::new(),
        }
    }
}

impl StudioConfig {
    pub fn load_from_ron(path: &Path) -> Result<StudioConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<StudioConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
