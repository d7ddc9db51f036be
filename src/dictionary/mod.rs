//! Dictionary abstractions and the profane word store.
//!
//! The traits abstract over trie-like backends traversed character by
//! character; edges are labeled with Unicode scalar values so that
//! non-Latin word lists get correct character-level distances.

pub mod store;
pub mod trie;

pub use store::{parse_word_list, WordList, WordListStore};
pub use trie::CharTrie;

/// Core dictionary abstraction for structural string search.
///
/// A dictionary is a set of terms traversable char-by-char via graph-like
/// nodes, letting the fuzzy matcher intersect it with an automaton.
pub trait Dictionary {
    /// The node type used for traversal
    type Node: DictionaryNode;

    /// Get the root node of the dictionary
    fn root(&self) -> Self::Node;

    /// Check if a term exists in the dictionary
    fn contains(&self, term: &str) -> bool {
        let mut node = self.root();
        for ch in term.chars() {
            match node.transition(ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_final()
    }

    /// Get the total number of terms (if available efficiently)
    fn len(&self) -> Option<usize>;

    /// Check if the dictionary is empty
    fn is_empty(&self) -> bool {
        self.len().map(|n| n == 0).unwrap_or(false)
    }
}

/// Traversable dictionary node.
///
/// Nodes form a graph representing the dictionary, where edges are
/// labeled with chars and final nodes mark complete terms.
pub trait DictionaryNode: Clone + Send + Sync {
    /// Check if this node marks the end of a valid term
    fn is_final(&self) -> bool;

    /// Transition to a child node via the given char
    ///
    /// Returns `None` if no such transition exists
    fn transition(&self, label: char) -> Option<Self>;

    /// Iterate over all outgoing edges as (char, child_node) pairs
    fn edges(&self) -> Box<dyn Iterator<Item = (char, Self)> + '_>;
}
