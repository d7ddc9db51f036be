//! Fuzzy-search index: a trie over one language's effective dictionary
//! plus the alphabet observed across all effective dictionaries.

use super::query::QueryIterator;
use crate::dictionary::{CharTrie, Dictionary};
use rustc_hash::FxHashSet;

/// Fuzzy-search index for one language's profane roots.
///
/// Rebuilt wholesale whenever the dictionary or language set changes,
/// never mutated incrementally.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    trie: CharTrie,
    alphabet: FxHashSet<char>,
}

impl FuzzyIndex {
    /// Build an index over `words` with the shared `alphabet`
    pub fn new<I, S>(words: I, alphabet: FxHashSet<char>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            trie: CharTrie::from_terms(words),
            alphabet,
        }
    }

    /// Dictionary roots within `tolerance` edits of `term`, in the
    /// trie's deterministic traversal order. Empty when nothing matches.
    ///
    /// Every query char outside the alphabet costs at least one edit
    /// (it can only be substituted away or deleted), so a term with more
    /// such chars than the tolerance is rejected without traversal.
    pub fn find_within(&self, term: &str, tolerance: usize) -> Vec<String> {
        let out_of_alphabet = term
            .chars()
            .filter(|ch| !self.alphabet.contains(ch))
            .count();
        if out_of_alphabet > tolerance {
            return Vec::new();
        }

        QueryIterator::new(self.trie.root(), term, tolerance).collect()
    }
}
