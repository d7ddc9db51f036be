//! Pluggable lexical capabilities: spell checking, morphological
//! analysis, and language detection.
//!
//! Each capability is a trait with a null implementation so the engine
//! degrades gracefully when a language has no backing resource. Real
//! backends (hunspell-style checkers, morphology engines, detector
//! services) plug in through the builder.

mod resolver;

pub use resolver::LexicalResolver;

/// Byte encoding of stems returned by a spell checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemEncoding {
    Utf8,
    Latin1,
}

/// Decode stem bytes under `encoding`. Undecodable stems are dropped
/// rather than surfaced as errors; a lost stem only narrows the set of
/// analyzed forms.
pub fn decode_stem(bytes: &[u8], encoding: StemEncoding) -> Option<String> {
    match encoding {
        StemEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
        StemEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Spell-checking capability for one language.
pub trait SpellChecker: Send + Sync {
    /// Whether `word` is a valid word of the language
    fn is_valid(&self, word: &str) -> bool;

    /// Candidate stems for `word`, as raw bytes in [`SpellChecker::encoding`]
    fn stems(&self, word: &str) -> Vec<Vec<u8>>;

    /// Encoding of the bytes returned by [`SpellChecker::stems`]
    fn encoding(&self) -> StemEncoding {
        StemEncoding::Utf8
    }
}

/// Fallback spell checker: recognizes nothing and stems every word to
/// itself, so deep analysis still sees the surface form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpellChecker;

impl SpellChecker for NullSpellChecker {
    fn is_valid(&self, _word: &str) -> bool {
        false
    }

    fn stems(&self, word: &str) -> Vec<Vec<u8>> {
        vec![word.as_bytes().to_vec()]
    }
}

/// Morphological analysis capability for one language.
pub trait MorphAnalyzer: Send + Sync {
    /// Normal forms (lemmas) of `word`
    fn normal_forms(&self, word: &str) -> Vec<String>;
}

/// Fallback analyzer: every word is its own normal form.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMorphAnalyzer;

impl MorphAnalyzer for NullMorphAnalyzer {
    fn normal_forms(&self, word: &str) -> Vec<String> {
        vec![word.to_string()]
    }
}

/// Language detection capability over free text.
pub trait LanguageDetector: Send + Sync {
    /// Candidate language codes with confidence, best first.
    /// Implementations must not report an "unknown" placeholder code.
    fn detect(&self, text: &str) -> Vec<(String, f64)>;
}
