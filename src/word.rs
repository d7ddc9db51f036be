//! Censoring result for a single word.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of censoring one word: the original surface, the
/// possibly-masked text, and the dictionary root that triggered the
/// match, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The word as it appeared in the input
    pub uncensored: String,
    /// The word after censoring; equals `uncensored` for clean words
    pub censored: String,
    /// The dictionary root the word matched, when profane
    pub original_profane_word: Option<String>,
}

impl Word {
    /// A word found clean: censored text equals the surface
    pub fn clean(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            censored: text.clone(),
            uncensored: text,
            original_profane_word: None,
        }
    }

    /// A word found profane, with the root it matched
    pub fn censored_from(
        uncensored: impl Into<String>,
        censored: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self {
            uncensored: uncensored.into(),
            censored: censored.into(),
            original_profane_word: Some(root.into()),
        }
    }

    /// Whether censoring changed the word
    pub fn is_profane(&self) -> bool {
        self.censored != self.uncensored
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.censored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_word() {
        let word = Word::clean("hello");
        assert!(!word.is_profane());
        assert_eq!(word.to_string(), "hello");
        assert_eq!(word.original_profane_word, None);
    }

    #[test]
    fn test_censored_word() {
        let word = Word::censored_from("sh1t", "****", "shit");
        assert!(word.is_profane());
        assert_eq!(word.to_string(), "****");
        assert_eq!(word.original_profane_word.as_deref(), Some("shit"));
    }
}
