//! Lazy Levenshtein automaton for bounded edit-distance matching.
//!
//! States are built on demand while traversing a dictionary trie, so no
//! automaton is ever materialized up front (Schulz & Mihov, 2002). Only
//! the standard algorithm (insert, delete, substitute) is implemented;
//! obfuscated profanity is overwhelmingly within those operations.

mod index;
mod position;
mod query;
mod state;
mod transition;

pub use index::FuzzyIndex;
pub use position::Position;
pub use query::QueryIterator;
pub use state::State;
pub use transition::{initial_state, transition_state};
