//! Fuzzy profanity detection and censoring.
//!
//! Detects and masks profane words in free text, tolerating inflection,
//! misspelling, and light obfuscation such as digit substitution. Each
//! token is decomposed into substrings, expanded into lexical forms,
//! and matched against per-language dictionaries of profane roots, both
//! exactly and within a bounded edit distance via a lazily evaluated
//! Levenshtein automaton intersected with a trie.
//!
//! External capabilities (tokenizers, spell checkers, morphological
//! analyzers, language detectors, cache backends) plug in through
//! traits; missing ones degrade gracefully to exact-match censoring.
//!
//! # Example
//!
//! ```
//! use profanity_filter::ProfanityFilter;
//!
//! let filter = ProfanityFilter::new()?;
//! assert_eq!(filter.censor("shiiit"), "******");
//! assert!(filter.is_clean("Have a nice day"));
//! # Ok::<(), profanity_filter::ConfigError>(())
//! ```

pub mod automaton;
pub mod cache;
pub mod censor;
pub mod config;
pub mod dictionary;
pub mod distance;
pub mod engine;
pub mod lexical;
pub mod segment;
pub mod tokenizer;
pub mod word;

pub use cache::{CacheError, CacheStore, InMemoryStore};
pub use config::{AnalysisType, Config, ConfigError, MAX_TOLERANCE};
pub use engine::{ProfanityFilter, ProfanityFilterBuilder};
pub use lexical::{
    LanguageDetector, MorphAnalyzer, NullMorphAnalyzer, NullSpellChecker, SpellChecker,
    StemEncoding,
};
pub use segment::Segment;
pub use tokenizer::{SimpleTokenizer, Token, Tokenizer};
pub use word::Word;
