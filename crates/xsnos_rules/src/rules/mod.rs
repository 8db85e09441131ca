//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here knows about turn order or
//! history, so the same rules serve play, undo and invariant checks.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, line_complete_for};

use super::{Board, GameOutcome};
use tracing::instrument;

/// Classifies the board.
///
/// A completed X line wins over a completed O line; both can only coexist on
/// a board reached through lenient turn order.
#[instrument(skip(board))]
pub fn evaluate_outcome(board: &Board) -> GameOutcome {
    if let Some(winner) = check_winner(board) {
        GameOutcome::win_for(winner)
    } else if is_draw(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Coord, Player};

    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let cell = match ch {
                    'X' => Cell::Occupied(Player::X),
                    'O' => Cell::Occupied(Player::O),
                    _ => Cell::Empty,
                };
                board.set(Coord::at(r as u8, c as u8), cell);
            }
        }
        board
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate_outcome(&Board::new()), GameOutcome::InProgress);
    }

    #[test]
    fn test_x_checked_before_o() {
        let board = board_from(["XXX", "OOO", "..."]);
        assert_eq!(evaluate_outcome(&board), GameOutcome::XWins);
    }

    #[test]
    fn test_o_column_win() {
        let board = board_from(["XO.", "XO.", ".OX"]);
        assert_eq!(evaluate_outcome(&board), GameOutcome::OWins);
    }

    #[test]
    fn test_full_board_draw() {
        let board = board_from(["XXO", "OOX", "XOX"]);
        assert_eq!(evaluate_outcome(&board), GameOutcome::Draw);
    }

    #[test]
    fn test_early_draw_before_full() {
        // Every line already holds both marks; the last empty cell can't help.
        let board = board_from(["XOX", "XOO", "OX."]);
        assert!(!board.is_full());
        assert_eq!(evaluate_outcome(&board), GameOutcome::Draw);
    }
}
