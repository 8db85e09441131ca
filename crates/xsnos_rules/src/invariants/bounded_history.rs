//! History never outgrows the board.

use super::super::{GameState, MAX_MOVES};
use super::Invariant;

/// Invariant: at most one move per cell.
pub struct HistoryBounded;

impl Invariant<GameState> for HistoryBounded {
    fn holds(state: &GameState) -> bool {
        state.history().len() <= MAX_MOVES
    }

    fn description() -> &'static str {
        "History holds at most 9 moves"
    }
}
