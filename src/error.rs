//! Error types for title-similarity
//!
//! Tokenizing, weighting and ranking are total over their inputs and never
//! fail. Errors only come from building a tokenizer or loading settings.

use thiserror::Error;

/// Errors raised while configuring a checker
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid word character pattern `{pattern}`: {source}")]
    InvalidWordPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("word character class `{pattern}` closes early; escape `]` as `\\]`")]
    UnbalancedWordClass { pattern: String },

    #[error("invalid similarity thresholds: medium ({medium}) must not exceed high ({high}) and both must lie in 0..=100")]
    InvalidThresholds { high: f64, medium: f64 },

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
