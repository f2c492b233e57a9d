//! Types and rules shared by the Omok server and client.
//!
//! Everything that both ends of the wire must agree on lives here: board
//! dimensions, stone and seat enums, the pure board rules, and the request /
//! response schema with its length-prefixed frame codec.

pub mod board;
pub mod protocol;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use board::{Board, PlaceError, Placement};
pub use protocol::{
    read_frame, recv_message, send_message, write_frame, ChatEntry, FrameError, MoveOutcome,
    Reason, Request, Response, RestartStatus, SeatPresence, Snapshot, VoteFlags,
};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 15;
/// Number of cells on a full board.
pub const CELL_COUNT: u32 = (BOARD_SIZE * BOARD_SIZE) as u32;
/// Contiguous stones needed to win.
pub const WIN_LENGTH: usize = 5;
/// Entries kept in the chat transcript.
pub const MAX_CHAT: usize = 100;
/// Longest chat message in characters; longer messages are truncated.
pub const MAX_CHAT_LEN: usize = 200;
/// Longest display name in characters; longer names are truncated.
pub const MAX_NAME_LEN: usize = 32;
/// Largest frame payload accepted on the wire.
pub const MAX_FRAME_LEN: usize = 256 * 1024;

/// A stone colour. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => f.write_str("BLACK"),
            Stone::White => f.write_str("WHITE"),
        }
    }
}

/// The role a session holds: one of the two playing colours or a spectator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Black,
    White,
    Spectator,
}

impl Seat {
    /// The stone this seat plays, or `None` for spectators.
    pub fn stone(self) -> Option<Stone> {
        match self {
            Seat::Black => Some(Stone::Black),
            Seat::White => Some(Stone::White),
            Seat::Spectator => None,
        }
    }

    pub fn is_player(self) -> bool {
        self.stone().is_some()
    }
}

impl From<Stone> for Seat {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Seat::Black,
            Stone::White => Seat::White,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Black => f.write_str("BLACK"),
            Seat::White => f.write_str("WHITE"),
            Seat::Spectator => f.write_str("SPECTATOR"),
        }
    }
}

/// Result of a finished match. A draw is its own value, never the absence
/// of a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Stone> for Winner {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Winner::Black,
            Stone::White => Winner::White,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Black => f.write_str("BLACK"),
            Winner::White => f.write_str("WHITE"),
            Winner::Draw => f.write_str("DRAW"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stone_opponent() {
        assert_eq!(Stone::Black.opponent(), Stone::White);
        assert_eq!(Stone::White.opponent(), Stone::Black);
    }

    #[test]
    fn test_seat_stone_mapping() {
        assert_eq!(Seat::Black.stone(), Some(Stone::Black));
        assert_eq!(Seat::White.stone(), Some(Stone::White));
        assert_eq!(Seat::Spectator.stone(), None);
        assert!(!Seat::Spectator.is_player());
        assert_eq!(Seat::from(Stone::White), Seat::White);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Stone::Black.to_string(), "BLACK");
        assert_eq!(Seat::Spectator.to_string(), "SPECTATOR");
        assert_eq!(Winner::Draw.to_string(), "DRAW");
        assert_eq!(Winner::from(Stone::White).to_string(), "WHITE");
    }

    #[test]
    fn test_constants() {
        assert_eq!(CELL_COUNT, 225);
        assert!(WIN_LENGTH <= BOARD_SIZE);
    }
}
