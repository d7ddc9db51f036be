//! Array-backed character trie.
//!
//! Profane root lists are small (tens to a few hundred words per
//! language), so a plain trie without suffix sharing is sufficient; the
//! array-of-nodes representation keeps traversal allocation-free and the
//! structure immutable once built.

use crate::dictionary::{Dictionary, DictionaryNode};
use smallvec::SmallVec;
use std::sync::Arc;

/// A node in the trie.
///
/// Edges are kept sorted by label so child lookup is a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrieNode {
    /// Edges to child nodes: (char label, target node index)
    edges: SmallVec<[(char, u32); 4]>,
    /// True if this node marks the end of a valid term
    is_final: bool,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode {
            edges: SmallVec::new(),
            is_final: false,
        }
    }
}

/// An immutable char-level trie over a set of terms.
///
/// Construction sorts and deduplicates the input; once built the trie is
/// a shared `Arc` of nodes, safe for concurrent traversal.
#[derive(Debug, Clone)]
pub struct CharTrie {
    nodes: Arc<Vec<TrieNode>>,
    term_count: usize,
}

impl CharTrie {
    /// Build a trie from terms; input is sorted and deduplicated.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = terms.into_iter().map(|t| t.as_ref().to_string()).collect();
        sorted.sort();
        sorted.dedup();

        let mut nodes = vec![TrieNode::new()];
        for term in &sorted {
            let mut current = 0usize;
            for ch in term.chars() {
                let next = match nodes[current].edges.iter().find(|(label, _)| *label == ch) {
                    Some((_, target)) => *target as usize,
                    None => {
                        nodes.push(TrieNode::new());
                        let target = (nodes.len() - 1) as u32;
                        // Sorted insertion keeps binary search valid.
                        let pos = nodes[current]
                            .edges
                            .binary_search_by_key(&ch, |(label, _)| *label)
                            .unwrap_or_else(|pos| pos);
                        nodes[current].edges.insert(pos, (ch, target));
                        target as usize
                    }
                };
                current = next;
            }
            nodes[current].is_final = true;
        }

        CharTrie {
            nodes: Arc::new(nodes),
            term_count: sorted.len(),
        }
    }
}

impl Dictionary for CharTrie {
    type Node = CharTrieNode;

    fn root(&self) -> CharTrieNode {
        CharTrieNode {
            nodes: Arc::clone(&self.nodes),
            index: 0,
        }
    }

    fn len(&self) -> Option<usize> {
        Some(self.term_count)
    }
}

/// Handle to a trie node: shared node array plus an index.
#[derive(Debug, Clone)]
pub struct CharTrieNode {
    nodes: Arc<Vec<TrieNode>>,
    index: u32,
}

impl DictionaryNode for CharTrieNode {
    fn is_final(&self) -> bool {
        self.nodes[self.index as usize].is_final
    }

    fn transition(&self, label: char) -> Option<Self> {
        let node = &self.nodes[self.index as usize];
        node.edges
            .binary_search_by_key(&label, |(ch, _)| *ch)
            .ok()
            .map(|pos| CharTrieNode {
                nodes: Arc::clone(&self.nodes),
                index: node.edges[pos].1,
            })
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (char, Self)> + '_> {
        let node = &self.nodes[self.index as usize];
        Box::new(node.edges.iter().map(move |&(label, target)| {
            (
                label,
                CharTrieNode {
                    nodes: Arc::clone(&self.nodes),
                    index: target,
                },
            )
        }))
    }
}
