use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CheckError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Check configuration. Every field has a default, so an empty document
/// (or `CheckConfig::default()`) reproduces the stock CRT check.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Only answer-key entries tagged with this scale are used.
    pub scale: String,
    pub paths: PathConfig,
    pub naming: ItemNaming,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            scale: "CRT".into(),
            paths: PathConfig::default(),
            naming: ItemNaming::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Input locations, relative to the repository root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub responses: PathBuf,
    pub answer_key: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            responses: PathBuf::from("outputs/sanity/crt_item_correctness.csv"),
            answer_key: PathBuf::from("data/hb_crt_answer_key.json"),
        }
    }
}

impl PathConfig {
    pub fn responses_under(&self, root: &Path) -> PathBuf {
        root.join(&self.responses)
    }

    pub fn answer_key_under(&self, root: &Path) -> PathBuf {
        root.join(&self.answer_key)
    }
}

// ---------------------------------------------------------------------------
// Item naming
// ---------------------------------------------------------------------------

/// Convention linking response-table item codes (`crt_1_1_num`) to
/// answer-key identifiers (`CRT_1_1`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ItemNaming {
    pub item_prefix: String,
    pub item_suffix: String,
    pub key_prefix: String,
}

impl Default for ItemNaming {
    fn default() -> Self {
        Self {
            item_prefix: "crt_".into(),
            item_suffix: "_num".into(),
            key_prefix: "CRT_".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, CheckError> {
        let config: CheckConfig =
            toml::from_str(input).map_err(|e| CheckError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if self.scale.is_empty() {
            return Err(CheckError::ConfigValidation("scale must not be empty".into()));
        }

        // An empty marker would make every item code split at position 0
        if self.naming.item_prefix.is_empty() {
            return Err(CheckError::ConfigValidation(
                "naming.item_prefix must not be empty".into(),
            ));
        }
        if self.naming.item_suffix.is_empty() {
            return Err(CheckError::ConfigValidation(
                "naming.item_suffix must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
