//! Complete game state owned by the engine.

use super::rules::evaluate_outcome;
use super::{Board, Cell, Coord, GameOutcome, Move, MoveHistory, Player};
use serde::Serialize;

/// Board, history and the outcome derived from them.
///
/// Only the engine mutates a `GameState`; everyone else sees it through
/// shared references or clones. It serializes for export but never
/// deserializes, so every instance was built by legal plays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) history: MoveHistory,
    pub(crate) outcome: GameOutcome,
}

impl GameState {
    /// Creates an empty game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: MoveHistory::new(),
            outcome: GameOutcome::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns the current outcome.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Player to move next, derived from the history.
    pub fn turn(&self) -> Player {
        self.history.turn()
    }

    /// Cell at `(row, col)`, or `None` off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        Coord::new(row, col).map(|coord| self.board.get(coord))
    }

    /// Places a validated move and reclassifies the board.
    pub(crate) fn apply(&mut self, mv: Move) {
        self.board.set(mv.coord, Cell::Occupied(mv.player));
        self.history.push(mv);
        self.outcome = evaluate_outcome(&self.board);
    }

    /// Takes back the latest move and reclassifies the board.
    pub(crate) fn revert(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board.set(mv.coord, Cell::Empty);
        self.outcome = evaluate_outcome(&self.board);
        Some(mv)
    }

    /// Returns to the empty starting position.
    pub(crate) fn clear(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.outcome = GameOutcome::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_exports_as_json() {
        let mut state = GameState::new();
        state.apply(Move::new(Player::X, Coord::at(1, 1)));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["outcome"], "InProgress");
        assert_eq!(json["history"][0]["player"], "X");
        assert_eq!(json["history"][0]["row"], 1);
        assert_eq!(json["board"]["cells"][4]["Occupied"], "X");
    }
}
