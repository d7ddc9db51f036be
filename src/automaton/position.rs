//! Position in the Levenshtein automaton.

use std::cmp::Ordering;

/// A position `(term_index, num_errors)` in the automaton.
///
/// Indicates we've consumed `term_index` characters of the query term
/// with `num_errors` accumulated edit operations. `Copy` keeps state
/// transitions free of allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Index into the query term (characters consumed)
    pub term_index: usize,

    /// Number of accumulated edit operations
    pub num_errors: usize,
}

impl Position {
    /// Create a new position
    #[inline(always)]
    pub fn new(term_index: usize, num_errors: usize) -> Self {
        Self {
            term_index,
            num_errors,
        }
    }

    /// Check if this position subsumes another.
    ///
    /// Everything reachable from `other` is reachable from `self` when
    /// both sit at the same query index and `self` carries fewer or
    /// equal errors; the subsumed position can be pruned.
    pub fn subsumes(&self, other: &Position) -> bool {
        self.term_index == other.term_index && self.num_errors <= other.num_errors
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.term_index
            .cmp(&other.term_index)
            .then_with(|| self.num_errors.cmp(&other.num_errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsumption() {
        assert!(Position::new(5, 2).subsumes(&Position::new(5, 3)));
        assert!(Position::new(3, 2).subsumes(&Position::new(3, 2)));
        assert!(!Position::new(5, 2).subsumes(&Position::new(4, 3)));
        assert!(!Position::new(5, 3).subsumes(&Position::new(5, 2)));
    }

    #[test]
    fn test_ordering() {
        let p1 = Position::new(3, 1);
        let p2 = Position::new(3, 2);
        let p3 = Position::new(4, 1);
        assert!(p1 < p2);
        assert!(p2 < p3);
    }
}
