//! Checker settings
//!
//! Plain data with defaults for every field. The crate never reads files or
//! the environment; callers pass a TOML string or build the struct directly.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tokenizer::WordChars;
use crate::vectorizer::evaluate::scoring::{LevelThresholds, DEFAULT_TOP_K};

/// Settings for `SimilarityChecker`
///
/// ```toml
/// top_k = 5
/// word_chars = "unicode"
/// filter_stopwords = false
///
/// [thresholds]
/// high = 80.0
/// medium = 50.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Number of results kept per check
    pub top_k: usize,

    /// Characters kept inside tokens
    pub word_chars: WordChars,

    /// Drop stopwords while tokenizing (both query and titles)
    pub filter_stopwords: bool,

    /// Percent bounds for high / medium similarity
    pub thresholds: LevelThresholds,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            word_chars: WordChars::default(),
            filter_stopwords: true,
            thresholds: LevelThresholds::default(),
        }
    }
}

impl CheckConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CheckConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}
