//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Coord, Player};
use tracing::instrument;

/// The 8 winning lines: rows, columns, diagonals.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
    [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
    [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
    // Columns
    [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
    [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
    [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
    // Diagonals
    [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
    [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)],
];

/// True iff all three cells of the line hold the player's piece.
pub fn line_complete_for(board: &Board, line: &[Coord; 3], player: Player) -> bool {
    line.iter()
        .all(|coord| board.get(*coord) == Cell::Occupied(player))
}

/// Checks if there is a winner on the board.
///
/// X is checked first; returns `Some(player)` for the first player with a
/// complete line.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O].into_iter().find(|player| {
        LINES
            .iter()
            .any(|line| line_complete_for(board, line, *player))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, player: Player, coords: &[(u8, u8)]) {
        for (r, c) in coords {
            board.set(Coord::at(*r, *c), Cell::Occupied(player));
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        place(&mut board, Player::X, &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(check_winner(&board), Some(Player::X));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        place(&mut board, Player::O, &[(0, 2), (1, 1), (2, 0)]);
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_winner_every_line() {
        for line in &LINES {
            let mut board = Board::new();
            for coord in line {
                board.set(*coord, Cell::Occupied(Player::O));
            }
            assert_eq!(check_winner(&board), Some(Player::O));
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        place(&mut board, Player::X, &[(0, 0), (0, 1)]);
        place(&mut board, Player::O, &[(0, 2)]);
        assert_eq!(check_winner(&board), None);
    }
}
