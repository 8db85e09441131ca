//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Cell, Coord, Player};
use super::win::LINES;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A line is dead once it holds at least one X and one O.
fn line_blocked(board: &Board, line: &[Coord; 3]) -> bool {
    let has = |player| line.iter().any(|c| board.get(*c) == Cell::Occupied(player));
    has(Player::X) && has(Player::O)
}

/// Checks whether no line can still be completed by either player.
///
/// This can hold before the board is full. Callers check for a winner first;
/// a board with a complete line never has every line blocked.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    LINES.iter().all(|line| line_blocked(board, line))
}
