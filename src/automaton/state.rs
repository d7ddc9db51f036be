//! Automaton state (collection of positions).

use super::position::Position;
use smallvec::SmallVec;

/// A state in the Levenshtein automaton: positions kept sorted with
/// subsumed entries removed. Most states hold only a handful of
/// positions, so storage is inline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    positions: SmallVec<[Position; 8]>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self {
            positions: SmallVec::new(),
        }
    }

    /// Add a position, checking subsumption online.
    ///
    /// A position already covered by an existing one is dropped; any
    /// existing positions the new one covers are removed.
    pub fn insert(&mut self, position: Position) {
        for existing in &self.positions {
            if existing.subsumes(&position) {
                return;
            }
        }
        self.positions.retain(|p| !position.subsumes(p));

        let insert_pos = self
            .positions
            .binary_search(&position)
            .unwrap_or_else(|pos| pos);
        self.positions.insert(insert_pos, position);
    }

    /// Get all positions
    #[inline(always)]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Check if this state is empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Infer the edit distance at a final dictionary node.
    ///
    /// Remaining unconsumed query characters each cost one deletion.
    #[inline]
    pub fn infer_distance(&self, query_length: usize) -> Option<usize> {
        self.positions
            .iter()
            .map(|p| p.num_errors + query_length.saturating_sub(p.term_index))
            .min()
    }
}
