//! Authoritative match state: one board plus turn and result bookkeeping.

use log::info;
use shared::{Board, MoveOutcome, Placement, Reason, Stone, Winner, BOARD_SIZE};

/// The match part of a snapshot: board, turn, result and move count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    pub board: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
    pub turn: Stone,
    pub winner: Option<Winner>,
    pub move_count: u32,
}

/// A single Omok match.
///
/// Invariants:
/// - once `winner` is set no further move is accepted
/// - `move_count` equals the number of occupied cells
/// - `turn` flips after every accepted move that does not end the match
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    turn: Stone,
    winner: Option<Winner>,
}

impl Match {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Stone::Black,
            winner: None,
        }
    }

    /// Starts a fresh match in place: empty board, black to move, no result.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Stone::Black;
        self.winner = None;
        info!("Match reset");
    }

    pub fn turn(&self) -> Stone {
        self.turn
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn move_count(&self) -> u32 {
        self.board.move_count()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Places a stone for `stone` at `(x, y)`.
    ///
    /// Refuses with `GAME_ALREADY_OVER` once the match has a result and with
    /// `NOT_YOUR_TURN` if `stone` is not the side to move; board failures
    /// (`OUT_OF_BOUNDS`, `ALREADY_OCCUPIED`) pass through unchanged. Nothing is
    /// mutated on any failure.
    pub fn apply_move(&mut self, stone: Stone, x: i64, y: i64) -> Result<MoveOutcome, Reason> {
        if self.winner.is_some() {
            return Err(Reason::GameAlreadyOver);
        }
        if stone != self.turn {
            return Err(Reason::NotYourTurn);
        }

        let placement = self.board.place(x, y, stone)?;
        match placement {
            Placement::Continue => self.turn = stone.opponent(),
            Placement::Win => {
                self.winner = Some(Winner::from(stone));
                info!("{} wins after {} moves", stone, self.move_count());
            }
            Placement::Draw => {
                self.winner = Some(Winner::Draw);
                info!("Draw after {} moves", self.move_count());
            }
        }

        Ok(MoveOutcome::from(placement))
    }

    pub fn snapshot(&self) -> MatchView {
        MatchView {
            board: *self.board.cells(),
            turn: self.turn,
            winner: self.winner,
            move_count: self.move_count(),
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Colour of `(x, y)` in a full board without any line longer than two:
    /// rows of pairs, each row shifted by one pair. Holds 113 black cells.
    fn draw_pattern(x: usize, y: usize) -> Stone {
        if (x / 2 + y) % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Move order that fills the board in strict black/white alternation,
    /// ending with `last` (which must be a black cell).
    fn alternating_order(
        colour: impl Fn(usize, usize) -> Stone,
        last: Option<(usize, usize)>,
    ) -> Vec<(i64, i64)> {
        let mut black = Vec::new();
        let mut white = Vec::new();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if Some((x, y)) == last {
                    continue;
                }
                match colour(x, y) {
                    Stone::Black => black.push((x as i64, y as i64)),
                    Stone::White => white.push((x as i64, y as i64)),
                }
            }
        }
        if let Some((x, y)) = last {
            black.push((x as i64, y as i64));
        }
        assert_eq!(black.len(), white.len() + 1);

        let mut order = Vec::with_capacity(black.len() + white.len());
        for i in 0..white.len() {
            order.push(black[i]);
            order.push(white[i]);
        }
        order.push(black[white.len()]);
        order
    }

    fn draw_order() -> Vec<(i64, i64)> {
        alternating_order(draw_pattern, None)
    }

    /// The draw pattern with row 7 columns 0..=4 forced black and three
    /// far-away cells forced white to keep the counts; `(4, 7)` is the only
    /// cell that completes a line.
    fn last_cell_win_order() -> Vec<(i64, i64)> {
        let colour = |x: usize, y: usize| match (x, y) {
            (0, 7) | (1, 7) | (4, 7) => Stone::Black,
            (0, 0) | (1, 0) | (5, 0) => Stone::White,
            _ => draw_pattern(x, y),
        };
        alternating_order(colour, Some((4, 7)))
    }

    #[test]
    fn test_new_match() {
        let game = Match::new();
        assert_eq!(game.turn(), Stone::Black);
        assert_eq!(game.winner(), None);
        assert_eq!(game.move_count(), 0);
        assert!(!game.is_finished());
    }

    #[test]
    fn test_turn_alternates_on_ordinary_moves() {
        let mut game = Match::new();
        assert_eq!(game.apply_move(Stone::Black, 7, 7), Ok(MoveOutcome::Ok));
        assert_eq!(game.turn(), Stone::White);
        assert_eq!(game.apply_move(Stone::White, 8, 7), Ok(MoveOutcome::Ok));
        assert_eq!(game.turn(), Stone::Black);
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_wrong_colour_is_rejected_without_mutation() {
        let mut game = Match::new();
        assert_eq!(game.apply_move(Stone::White, 0, 0), Err(Reason::NotYourTurn));
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.turn(), Stone::Black);
    }

    #[test]
    fn test_board_failures_do_not_flip_turn() {
        let mut game = Match::new();
        game.apply_move(Stone::Black, 0, 0).unwrap();
        assert_eq!(game.apply_move(Stone::White, 0, 0), Err(Reason::AlreadyOccupied));
        assert_eq!(game.apply_move(Stone::White, 15, 0), Err(Reason::OutOfBounds));
        assert_eq!(game.turn(), Stone::White);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_winning_move_ends_match_without_alternating() {
        let mut game = Match::new();
        for i in 0..4 {
            game.apply_move(Stone::Black, i, 0).unwrap();
            game.apply_move(Stone::White, i, 1).unwrap();
        }
        assert_eq!(game.apply_move(Stone::Black, 4, 0), Ok(MoveOutcome::Win));
        assert_eq!(game.winner(), Some(Winner::Black));
        assert_eq!(game.turn(), Stone::Black);

        assert_eq!(game.apply_move(Stone::Black, 9, 9), Err(Reason::GameAlreadyOver));
        assert_eq!(game.apply_move(Stone::White, 9, 9), Err(Reason::GameAlreadyOver));
        assert_eq!(game.move_count(), 9);
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let mut game = Match::new();
        let order = draw_order();
        let (last, rest) = order.split_last().unwrap();

        for &(x, y) in rest {
            let stone = game.turn();
            assert_eq!(game.apply_move(stone, x, y), Ok(MoveOutcome::Ok));
        }

        assert_eq!(game.apply_move(Stone::Black, last.0, last.1), Ok(MoveOutcome::Draw));
        assert_eq!(game.winner(), Some(Winner::Draw));
        assert_eq!(game.move_count(), 225);
    }

    #[test]
    fn test_filling_last_cell_with_a_line_is_a_win() {
        let mut game = Match::new();
        let order = last_cell_win_order();
        let (last, rest) = order.split_last().unwrap();
        assert_eq!(*last, (4, 7));

        for &(x, y) in rest {
            let stone = game.turn();
            assert_eq!(game.apply_move(stone, x, y), Ok(MoveOutcome::Ok));
        }

        assert_eq!(game.move_count(), 224);
        assert_eq!(game.apply_move(Stone::Black, 4, 7), Ok(MoveOutcome::Win));
        assert_eq!(game.winner(), Some(Winner::Black));
        assert!(game.board().is_full());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Match::new();
        for i in 0..4 {
            game.apply_move(Stone::Black, i, 5).unwrap();
            game.apply_move(Stone::White, i, 6).unwrap();
        }
        game.apply_move(Stone::Black, 4, 5).unwrap();
        assert!(game.is_finished());

        game.reset();

        let view = game.snapshot();
        assert_eq!(view.turn, Stone::Black);
        assert_eq!(view.winner, None);
        assert_eq!(view.move_count, 0);
        assert!(view.board.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut game = Match::new();
        game.apply_move(Stone::Black, 1, 2).unwrap();
        let view = game.snapshot();
        game.apply_move(Stone::White, 3, 4).unwrap();

        assert_eq!(view.board[2][1], Some(Stone::Black));
        assert_eq!(view.board[4][3], None);
        assert_eq!(view.move_count, 1);
        assert_eq!(view.turn, Stone::White);
    }
}
