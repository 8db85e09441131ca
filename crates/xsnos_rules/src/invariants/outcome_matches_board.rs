//! Outcome invariant: the stored outcome is exactly what the board implies.

use super::super::GameState;
use super::super::rules::evaluate_outcome;
use super::Invariant;

/// Invariant: the outcome is recomputed, never stale.
pub struct OutcomeMatchesBoard;

impl Invariant<GameState> for OutcomeMatchesBoard {
    fn holds(state: &GameState) -> bool {
        state.outcome() == evaluate_outcome(state.board())
    }

    fn description() -> &'static str {
        "Outcome matches the board"
    }
}
