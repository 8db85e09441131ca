//! Ordered record of accepted moves.
//!
//! The history is the source of truth for turn order: whose turn it is
//! follows from how many pieces each side has played, never from a flag
//! flipped on every move.

use super::{Board, Cell, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Most moves a game can hold (one per cell).
pub const MAX_MOVES: usize = 9;

/// Moves in the order they were played.
///
/// Serializes as a plain move list. Saved games load back through
/// [`GameRecord`] and an engine replay, which re-checks every move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            moves: Vec::with_capacity(MAX_MOVES),
        }
    }

    /// Appends an accepted move.
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.moves.len() < MAX_MOVES, "history overflow");
        self.moves.push(mv);
    }

    /// Removes and returns the most recent move.
    pub(crate) fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Forgets every move.
    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }

    /// Most recent move, if any.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Number of moves played.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True before the first move.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Iterates moves oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Moves as a slice, oldest first.
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves made by the player.
    pub fn count(&self, player: Player) -> usize {
        self.moves.iter().filter(|m| m.player == player).count()
    }

    /// Player to move next: X when both sides have played equally often,
    /// otherwise O.
    pub fn turn(&self) -> Player {
        if self.count(Player::X) == self.count(Player::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Rebuilds the board by placing every move onto an empty board.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn replay(&self) -> Board {
        let mut board = Board::new();
        for mv in &self.moves {
            board.set(mv.coord, Cell::Occupied(mv.player));
        }
        board
    }

    /// Transcript of the moves so far.
    pub fn transcript(&self) -> Transcript {
        Transcript(self.moves.clone())
    }
}

impl<'a> IntoIterator for &'a MoveHistory {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Human-readable log of a game: `X->(0,0):O->(1,1):...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript(Vec<Move>);

impl Transcript {
    /// Moves in the transcript.
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    /// The transcript followed by a newline, one finished game per line.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

/// A saved game: the moves of one game in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in play order.
    pub moves: Vec<Move>,
}

impl GameRecord {
    /// Parses a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the record as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&MoveHistory> for GameRecord {
    fn from(history: &MoveHistory) -> Self {
        Self {
            moves: history.as_slice().to_vec(),
        }
    }
}
