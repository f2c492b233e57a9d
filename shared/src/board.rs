//! Pure Omok board rules: placement legality, five-in-a-row detection and
//! the full-board draw condition. No I/O and no turn bookkeeping.

use crate::{Stone, BOARD_SIZE, CELL_COUNT, WIN_LENGTH};
use thiserror::Error;

/// The four line directions through a cell: horizontal, vertical and both
/// diagonals. Each is walked forwards and backwards.
const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Why a stone could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("OUT_OF_BOUNDS")]
    OutOfBounds,
    #[error("ALREADY_OCCUPIED")]
    AlreadyOccupied,
}

/// What an accepted placement did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The game goes on.
    Continue,
    /// The placed stone completed a line of five or more.
    Win,
    /// The placed stone filled the last cell without completing a line.
    Draw,
}

/// A 15×15 grid of cells, indexed `[y][x]`.
///
/// Cells only ever go from empty to occupied; the only way back is a fresh
/// board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
    move_count: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            move_count: 0,
        }
    }

    pub fn in_bounds(x: i64, y: i64) -> bool {
        (0..BOARD_SIZE as i64).contains(&x) && (0..BOARD_SIZE as i64).contains(&y)
    }

    /// Returns the stone at `(x, y)`, or `None` if the cell is empty or off
    /// the board.
    pub fn get(&self, x: i64, y: i64) -> Option<Stone> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    pub fn cells(&self) -> &[[Option<Stone>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn is_full(&self) -> bool {
        self.move_count == CELL_COUNT
    }

    /// Places `stone` at `(x, y)` and reports whether the move ended the game.
    ///
    /// The win check runs before the full-board check, so filling the last
    /// cell with a winning stone is a win, not a draw. A failed placement
    /// leaves the board untouched.
    pub fn place(&mut self, x: i64, y: i64, stone: Stone) -> Result<Placement, PlaceError> {
        if !Self::in_bounds(x, y) {
            return Err(PlaceError::OutOfBounds);
        }

        let cell = &mut self.cells[y as usize][x as usize];
        if cell.is_some() {
            return Err(PlaceError::AlreadyOccupied);
        }

        *cell = Some(stone);
        self.move_count += 1;

        if self.check_five_in_a_row(x, y) {
            Ok(Placement::Win)
        } else if self.is_full() {
            Ok(Placement::Draw)
        } else {
            Ok(Placement::Continue)
        }
    }

    /// Returns true if the stone at `(x, y)` sits on a line of at least five
    /// same-coloured stones in any of the four directions.
    ///
    /// Counting is recomputed from the grid on every call and stops at the
    /// first empty cell, opposing stone or board edge.
    pub fn check_five_in_a_row(&self, x: i64, y: i64) -> bool {
        let Some(stone) = self.get(x, y) else {
            return false;
        };

        DIRECTIONS.iter().any(|&(dx, dy)| {
            let run = 1
                + self.count_from(x, y, dx, dy, stone)
                + self.count_from(x, y, -dx, -dy, stone);
            run >= WIN_LENGTH
        })
    }

    /// Counts consecutive `stone` cells starting one step away from `(x, y)`.
    fn count_from(&self, x: i64, y: i64, dx: i64, dy: i64, stone: Stone) -> usize {
        let mut count = 0;
        let (mut nx, mut ny) = (x + dx, y + dy);
        while self.get(nx, ny) == Some(stone) {
            count += 1;
            nx += dx;
            ny += dy;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(board: &mut Board, stones: &[(i64, i64)], stone: Stone) {
        for &(x, y) in stones {
            board.place(x, y, stone).unwrap();
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.move_count(), 0);
        assert!(board.cells().iter().flatten().all(Option::is_none));
        assert!(!board.is_full());
    }

    #[test]
    fn test_place_out_of_bounds_leaves_board_unchanged() {
        let mut board = Board::new();
        board.place(7, 7, Stone::Black).unwrap();
        let before = board.clone();

        let outside = [
            (-1, 0),
            (0, -1),
            (15, 0),
            (0, 15),
            (15, 15),
            (-100, 3),
            (3, i64::MAX),
            (i64::MIN, i64::MIN),
        ];
        for (x, y) in outside {
            assert_eq!(board.place(x, y, Stone::White), Err(PlaceError::OutOfBounds));
        }

        assert_eq!(board, before);
    }

    #[test]
    fn test_place_occupied_cell() {
        let mut board = Board::new();
        assert_eq!(board.place(3, 4, Stone::Black), Ok(Placement::Continue));
        assert_eq!(board.place(3, 4, Stone::White), Err(PlaceError::AlreadyOccupied));
        assert_eq!(board.get(3, 4), Some(Stone::Black));
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn test_cells_are_indexed_y_then_x() {
        let mut board = Board::new();
        board.place(2, 9, Stone::White).unwrap();
        assert_eq!(board.cells()[9][2], Some(Stone::White));
        assert_eq!(board.cells()[2][9], None);
    }

    #[test]
    fn test_four_in_a_row_is_not_a_win() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 0), (1, 0), (2, 0)], Stone::Black);
        assert_eq!(board.place(3, 0, Stone::Black), Ok(Placement::Continue));
        assert!(!board.check_five_in_a_row(3, 0));
    }

    #[test]
    fn test_exactly_five_horizontal_wins() {
        let mut board = Board::new();
        place_all(&mut board, &[(5, 7), (6, 7), (8, 7), (9, 7)], Stone::Black);
        // The gap is filled last, so the run extends both ways from the stone.
        assert_eq!(board.place(7, 7, Stone::Black), Ok(Placement::Win));
    }

    #[test]
    fn test_six_in_a_row_also_wins() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 3), (0, 4), (0, 5), (0, 7), (0, 8)], Stone::White);
        assert_eq!(board.place(0, 6, Stone::White), Ok(Placement::Win));
    }

    #[test]
    fn test_vertical_win_at_bottom_edge() {
        let mut board = Board::new();
        place_all(&mut board, &[(14, 10), (14, 11), (14, 12), (14, 13)], Stone::Black);
        assert_eq!(board.place(14, 14, Stone::Black), Ok(Placement::Win));
    }

    #[test]
    fn test_diagonal_win() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 0), (1, 1), (2, 2), (3, 3)], Stone::White);
        assert_eq!(board.place(4, 4, Stone::White), Ok(Placement::Win));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut board = Board::new();
        place_all(&mut board, &[(14, 0), (13, 1), (11, 3), (10, 4)], Stone::Black);
        assert_eq!(board.place(12, 2, Stone::Black), Ok(Placement::Win));
    }

    #[test]
    fn test_opponent_stone_breaks_the_run() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 0), (1, 0), (3, 0), (4, 0)], Stone::Black);
        board.place(5, 0, Stone::White).unwrap();
        place_all(&mut board, &[(6, 0)], Stone::Black);
        assert_eq!(board.place(2, 0, Stone::Black), Ok(Placement::Win));

        let mut board = Board::new();
        place_all(&mut board, &[(0, 1), (1, 1), (3, 1), (4, 1)], Stone::Black);
        board.place(2, 1, Stone::White).unwrap();
        assert!(!board.check_five_in_a_row(1, 1));
        assert!(!board.check_five_in_a_row(3, 1));
    }

    #[test]
    fn test_check_on_empty_or_outside_cell() {
        let board = Board::new();
        assert!(!board.check_five_in_a_row(7, 7));
        assert!(!board.check_five_in_a_row(-1, 20));
    }

    #[test]
    fn test_win_wraps_do_not_cross_edges() {
        let mut board = Board::new();
        // Three at the end of row 0 and two at the start of row 1 are not
        // contiguous.
        place_all(&mut board, &[(12, 0), (13, 0), (14, 0), (0, 1)], Stone::Black);
        assert_eq!(board.place(1, 1, Stone::Black), Ok(Placement::Continue));
    }
}
