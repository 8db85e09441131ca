//! Replay invariant: the history rebuilds the board exactly.

use super::super::{Board, Cell, GameState};
use super::Invariant;

/// Invariant: replaying the history onto an empty board reproduces the
/// current board, and no move lands on an occupied cell.
///
/// Together these mean a cell only ever goes `Empty -> X|O` forward and back
/// to `Empty` on undo, never `X <-> O`.
pub struct HistoryReplaysToBoard;

impl Invariant<GameState> for HistoryReplaysToBoard {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();

        for mv in state.history() {
            if !reconstructed.is_empty(mv.coord) {
                return false;
            }
            reconstructed.set(mv.coord, Cell::Occupied(mv.player));
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "History replays onto an empty board to the current board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, Move, Player};

    #[test]
    fn test_empty_game_holds() {
        assert!(HistoryReplaysToBoard::holds(&GameState::new()));
    }

    #[test]
    fn test_moves_and_undo_hold() {
        let mut state = GameState::new();
        state.apply(Move::new(Player::X, Coord::at(0, 0)));
        state.apply(Move::new(Player::O, Coord::at(2, 2)));
        assert!(HistoryReplaysToBoard::holds(&state));
        state.revert();
        assert!(HistoryReplaysToBoard::holds(&state));
    }

    #[test]
    fn test_overwritten_cell_violates() {
        let mut state = GameState::new();
        state.apply(Move::new(Player::X, Coord::at(1, 1)));
        state.board.set(Coord::at(1, 1), Cell::Occupied(Player::O));
        assert!(!HistoryReplaysToBoard::holds(&state));
    }

    #[test]
    fn test_duplicate_coordinate_in_history_violates() {
        let mut state = GameState::new();
        state.apply(Move::new(Player::X, Coord::at(1, 1)));
        state.history.push(Move::new(Player::X, Coord::at(1, 1)));
        assert!(!HistoryReplaysToBoard::holds(&state));
    }
}
