//! Terminal and non-terminal classification of a board.

use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of the current board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum GameOutcome {
    /// No winner yet and some line can still be completed.
    #[default]
    #[display("In Progress")]
    InProgress,
    /// X completed a line.
    #[display("X Wins")]
    XWins,
    /// O completed a line.
    #[display("O Wins")]
    OWins,
    /// Every line holds both an X and an O.
    #[display("Draw")]
    Draw,
}

impl GameOutcome {
    /// Outcome for a win by the given player.
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::X => GameOutcome::XWins,
            Player::O => GameOutcome::OWins,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::XWins => Some(Player::X),
            GameOutcome::OWins => Some(Player::O),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }
}
