//! Lazy intersection of a dictionary with a Levenshtein automaton.

use super::state::State;
use super::transition::{initial_state, transition_state};
use crate::dictionary::DictionaryNode;
use std::collections::VecDeque;

/// A point in the simultaneous traversal of the dictionary graph and the
/// automaton: current node, current state, and a parent link for
/// reconstructing the matched term.
pub struct Intersection<N: DictionaryNode> {
    /// Edge label from parent
    label: Option<char>,
    /// Current dictionary node
    node: N,
    /// Current automaton state
    state: State,
    /// Parent intersection (path reconstruction)
    parent: Option<Box<Intersection<N>>>,
}

impl<N: DictionaryNode> Intersection<N> {
    fn new(node: N, state: State) -> Self {
        Self {
            label: None,
            node,
            state,
            parent: None,
        }
    }

    /// Reconstruct the dictionary term from root to this intersection
    fn term(&self) -> String {
        let mut chars = Vec::new();
        let mut current = self;
        while let Some(label) = current.label {
            chars.push(label);
            match &current.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        chars.reverse();
        chars.into_iter().collect()
    }
}

/// Breadth-first iterator over dictionary terms within `max_distance`
/// edits of the query.
///
/// Traversal order is fixed by the dictionary's edge order, so results
/// are deterministic for a given dictionary build.
pub struct QueryIterator<N: DictionaryNode> {
    pending: VecDeque<Box<Intersection<N>>>,
    query: Vec<char>,
    max_distance: usize,
    finished: bool,
}

impl<N: DictionaryNode> QueryIterator<N> {
    /// Create a query over the dictionary rooted at `root`
    pub fn new(root: N, query: &str, max_distance: usize) -> Self {
        let query: Vec<char> = query.chars().collect();
        let initial = initial_state(query.len(), max_distance);

        let mut pending = VecDeque::new();
        pending.push_back(Box::new(Intersection::new(root, initial)));

        Self {
            pending,
            query,
            max_distance,
            finished: false,
        }
    }

    fn advance(&mut self) -> Option<String> {
        while let Some(intersection) = self.pending.pop_front() {
            self.queue_children(&intersection);

            if intersection.node.is_final() {
                if let Some(distance) = intersection.state.infer_distance(self.query.len()) {
                    if distance <= self.max_distance {
                        return Some(intersection.term());
                    }
                }
            }
        }

        self.finished = true;
        None
    }

    fn queue_children(&mut self, intersection: &Intersection<N>) {
        for (label, child_node) in intersection.node.edges() {
            if let Some(next_state) = transition_state(
                &intersection.state,
                label,
                &self.query,
                self.max_distance,
            ) {
                let parent_box = Box::new(Intersection {
                    label: intersection.label,
                    node: intersection.node.clone(),
                    state: intersection.state.clone(),
                    parent: intersection.parent.clone(),
                });

                self.pending.push_back(Box::new(Intersection {
                    label: Some(label),
                    node: child_node,
                    state: next_state,
                    parent: Some(parent_box),
                }));
            }
        }
    }
}

impl<N: DictionaryNode> Clone for Intersection<N> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            node: self.node.clone(),
            state: self.state.clone(),
            parent: self.parent.clone(),
        }
    }
}

impl<N: DictionaryNode> Iterator for QueryIterator<N> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            None
        } else {
            self.advance()
        }
    }
}
