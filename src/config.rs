//! Engine configuration, validation, and the cache-scoping fingerprint.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Hard ceiling on the edit-distance tolerance of any single lookup,
/// regardless of word length.
pub const MAX_TOLERANCE: usize = 3;

/// Optional analysis layers of the engine.
///
/// A requested analysis is only *active* when its backing resources are
/// available; deep analysis needs none beyond the word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisType {
    /// Fuzzy matching of distorted spellings
    Deep,
    /// Lemma and normal-form expansion
    Morphological,
    /// Per-segment language detection
    Multilingual,
}

impl AnalysisType {
    /// Every analysis, the default request set
    pub fn all() -> Vec<AnalysisType> {
        vec![
            AnalysisType::Deep,
            AnalysisType::Morphological,
            AnalysisType::Multilingual,
        ]
    }
}

/// Configuration rejected at construction or reconfiguration time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("censor char must be a single character, got {0:?}")]
    InvalidCensorChar(String),
    #[error("at least one language must be configured")]
    NoLanguages,
    #[error("no profane word list resolves for any of: {languages}")]
    NoProfaneWordLists { languages: String },
    #[error("no tokenizer resolves for any of: {languages}")]
    NoTokenizer { languages: String },
}

/// User-facing engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Character used for masking
    pub censor_char: char,
    /// Mask whole words rather than only the profane span
    pub censor_whole_words: bool,
    /// Requested analysis layers
    pub analyses: Vec<AnalysisType>,
    /// Language codes in priority order
    pub languages: Vec<String>,
    /// Tolerance per query character, capped at [`MAX_TOLERANCE`]
    pub max_relative_distance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            censor_char: '*',
            censor_whole_words: true,
            analyses: AnalysisType::all(),
            languages: vec!["en".to_string()],
            max_relative_distance: 0.34,
        }
    }
}

impl Config {
    /// Parse a censor character from a string that must hold exactly one
    /// character.
    pub fn censor_char_from_str(s: &str) -> Result<char, ConfigError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(ConfigError::InvalidCensorChar(s.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        Ok(())
    }

    /// Whether an analysis was requested (not necessarily active)
    pub fn has_analysis(&self, analysis: AnalysisType) -> bool {
        self.analyses.contains(&analysis)
    }

    /// Comma-joined language list for diagnostics
    pub fn languages_str(&self) -> String {
        self.languages.join(", ")
    }

    /// Edit-distance tolerance for a query of `length` characters
    pub fn tolerance(&self, length: usize) -> usize {
        let raw = (self.max_relative_distance * length as f64).floor() as usize;
        raw.min(MAX_TOLERANCE)
    }
}

/// Digest of every configuration input that affects censoring results.
///
/// Cache keys are prefixed with this value, so any change that could
/// alter an answer invalidates all prior entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Compute the fingerprint from the configuration and the *active*
    /// analysis flags (requested analyses missing their resources do
    /// not affect results and must not affect the fingerprint).
    pub fn compute(config: &Config, deep: bool, morphological: bool, multilingual: bool) -> Self {
        let mut hasher = FxHasher::default();
        config.censor_char.hash(&mut hasher);
        config.censor_whole_words.hash(&mut hasher);
        deep.hash(&mut hasher);
        morphological.hash(&mut hasher);
        multilingual.hash(&mut hasher);
        config.max_relative_distance.to_bits().hash(&mut hasher);
        for language in &config.languages {
            language.hash(&mut hasher);
        }
        Fingerprint(hasher.finish())
    }

    /// Wrap a raw value (tests and external stores)
    pub fn from_raw(raw: u64) -> Self {
        Fingerprint(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
