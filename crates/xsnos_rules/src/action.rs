//! First-class move and error types.
//!
//! A move is a domain event: validated before it touches the board, recorded
//! in history once accepted, and popped again on undo.

use super::{Coord, GameOutcome, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One placed piece, in the order played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player who placed the piece.
    pub player: Player,
    /// Where the piece was placed.
    #[serde(flatten)]
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, coord: Coord) -> Self {
        Self { player, coord }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the coordinate of this move.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Row of the placed piece.
    pub fn row(&self) -> usize {
        self.coord.row()
    }

    /// Column of the placed piece.
    pub fn col(&self) -> usize {
        self.coord.col()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.player, self.coord)
    }
}

/// Why a play was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The coordinates fall outside the 3x3 board.
    #[display("({row},{col}) is off the board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a piece.
    #[display("cell {_0} is already occupied")]
    Occupied(Coord),

    /// The player is not the one whose turn it is.
    #[display("it is {expected}'s turn, not {player}'s")]
    OutOfTurn {
        /// Player who tried to move.
        player: Player,
        /// Player whose turn it is.
        expected: Player,
    },

    /// The player has no pieces left in their tray.
    #[display("{_0} has no pieces left")]
    TrayEmpty(Player),

    /// A player has already won; reset or undo first.
    #[display("game is over ({_0})")]
    GameOver(GameOutcome),
}

/// Errors returned by the rules engine.
///
/// Neither kind is fatal: the engine leaves its state untouched and the
/// caller is free to ignore the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// A play was declined.
    #[display("Invalid move: {_0}")]
    InvalidMove(InvalidMove),

    /// Undo was requested with no moves to take back.
    #[display("Nothing to undo")]
    NoOpUndo,
}

impl From<InvalidMove> for RulesError {
    fn from(reason: InvalidMove) -> Self {
        RulesError::InvalidMove(reason)
    }
}

impl std::error::Error for InvalidMove {}
impl std::error::Error for RulesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display_matches_transcript_format() {
        let mv = Move::new(Player::O, Coord::at(2, 1));
        assert_eq!(mv.to_string(), "O->(2,1)");
    }

    #[test]
    fn test_move_json_shape() {
        let mv = Move::new(Player::X, Coord::at(0, 2));
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"player":"X","row":0,"col":2}"#);
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }

    #[test]
    fn test_error_messages() {
        let err = RulesError::from(InvalidMove::OutOfRange { row: 5, col: 0 });
        assert_eq!(err.to_string(), "Invalid move: (5,0) is off the board");
        assert_eq!(RulesError::NoOpUndo.to_string(), "Nothing to undo");
    }
}
