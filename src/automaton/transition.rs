//! State transition logic for the standard Levenshtein automaton.
//!
//! Supports insert, delete, and substitute operations. Deletions (skipping
//! query characters) never consume a dictionary character, so they are
//! applied as an epsilon closure before each transition; trailing
//! deletions are accounted for by [`State::infer_distance`].

use super::position::Position;
use super::state::State;
use smallvec::SmallVec;

/// Create the initial state for a query.
///
/// Contains `(0, 0)` plus positions for initial deletions of up to
/// `max_distance` leading query characters.
pub fn initial_state(query_length: usize, max_distance: usize) -> State {
    let mut state = State::new();
    state.insert(Position::new(0, 0));
    for i in 1..=max_distance.min(query_length) {
        state.insert(Position::new(i, i));
    }
    state
}

/// Add positions reachable by deleting query characters without
/// consuming dictionary input.
fn epsilon_closure_mut(state: &mut State, query_length: usize, max_distance: usize) {
    let mut to_process: SmallVec<[Position; 8]> = SmallVec::new();
    to_process.extend(state.positions().iter().copied());

    let mut processed = 0;
    while processed < to_process.len() {
        let position = to_process[processed];
        processed += 1;

        if position.num_errors < max_distance && position.term_index < query_length {
            let deleted = Position::new(position.term_index + 1, position.num_errors + 1);
            if !to_process.contains(&deleted) {
                state.insert(deleted);
                to_process.push(deleted);
            }
        }
    }
}

/// Transition an entire state on a dictionary character.
///
/// Returns `None` when no position survives, which prunes the
/// corresponding dictionary branch.
pub fn transition_state(
    state: &State,
    dict_char: char,
    query: &[char],
    max_distance: usize,
) -> Option<State> {
    let query_length = query.len();

    let mut expanded = state.clone();
    epsilon_closure_mut(&mut expanded, query_length, max_distance);

    let mut next_state = State::new();
    for position in expanded.positions() {
        let i = position.term_index;
        let e = position.num_errors;

        if i < query_length {
            if query[i] == dict_char {
                // Match: advance without error
                next_state.insert(Position::new(i + 1, e));
            } else if e < max_distance {
                // Substitution
                next_state.insert(Position::new(i + 1, e + 1));
            }
        }

        // Insertion: consume the dictionary char without advancing
        if e < max_distance {
            next_state.insert(Position::new(i, e + 1));
        }
    }

    if next_state.is_empty() {
        None
    } else {
        Some(next_state)
    }
}
