//! Wire schema and frame codec.
//!
//! Every message travels as a 4-byte big-endian length followed by a bincode
//! payload. Requests are intentionally loose (optional fields) so the server
//! can report exactly which part of a request was missing; responses are
//! fully typed.

use crate::{Seat, Stone, Winner, BOARD_SIZE, MAX_FRAME_LEN};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::board::{PlaceError, Placement};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    Join {
        name: Option<String>,
    },
    Move {
        token: Option<String>,
        x: Option<i64>,
        y: Option<i64>,
    },
    Quit {
        token: Option<String>,
    },
    State,
    Restart {
        token: Option<String>,
    },
    Chat {
        token: Option<String>,
        text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Joined {
        seat: Seat,
        token: String,
        state: Snapshot,
    },
    Moved {
        outcome: MoveOutcome,
        state: Snapshot,
    },
    Bye,
    State {
        state: Snapshot,
    },
    Restart {
        status: RestartStatus,
        state: Snapshot,
    },
    Chat {
        chat: Vec<ChatEntry>,
    },
    Failure {
        reason: Reason,
        state: Option<Snapshot>,
    },
}

impl Response {
    pub fn is_ok(&self) -> bool {
        !matches!(self, Response::Failure { .. })
    }

    /// The snapshot carried by this response, if any.
    pub fn state(&self) -> Option<&Snapshot> {
        match self {
            Response::Joined { state, .. }
            | Response::Moved { state, .. }
            | Response::State { state }
            | Response::Restart { state, .. } => Some(state),
            Response::Failure { state, .. } => state.as_ref(),
            Response::Bye | Response::Chat { .. } => None,
        }
    }
}

/// Immutable view of the whole shared state, safe to hand to any caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cells indexed `[y][x]`.
    pub board: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
    pub turn: Stone,
    pub winner: Option<Winner>,
    pub move_count: u32,
    pub players: SeatPresence,
    pub restart: VoteFlags,
    pub chat: Vec<ChatEntry>,
}

impl Snapshot {
    pub fn cell(&self, x: usize, y: usize) -> Option<Stone> {
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPresence {
    pub black: bool,
    pub white: bool,
    /// Both seats are occupied.
    pub ready: bool,
}

/// Whether the current occupant of each seat has asked for a rematch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteFlags {
    pub black: bool,
    pub white: bool,
}

impl VoteFlags {
    pub fn for_seat(&self, seat: Seat) -> bool {
        match seat {
            Seat::Black => self.black,
            Seat::White => self.white,
            Seat::Spectator => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub name: String,
    pub text: String,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Ok,
    Win,
    Draw,
}

impl From<Placement> for MoveOutcome {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Continue => MoveOutcome::Ok,
            Placement::Win => MoveOutcome::Win,
            Placement::Draw => MoveOutcome::Draw,
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Ok => f.write_str("OK"),
            MoveOutcome::Win => f.write_str("WIN"),
            MoveOutcome::Draw => f.write_str("DRAW"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartStatus {
    /// The vote was recorded; the other seat has not agreed yet.
    Pending,
    /// Both seats agreed and a fresh match has started.
    Restarted,
}

impl fmt::Display for RestartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartStatus::Pending => f.write_str("PENDING"),
            RestartStatus::Restarted => f.write_str("RESTARTED"),
        }
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum Reason {
    #[error("TOKEN_REQUIRED")]
    TokenRequired,
    #[error("INVALID_TOKEN")]
    InvalidToken,
    #[error("NOT_A_PLAYER")]
    NotAPlayer,
    #[error("INVALID_COORD")]
    InvalidCoord,
    #[error("INVALID_MESSAGE")]
    InvalidMessage,
    #[error("INVALID_REQUEST")]
    InvalidRequest,
    #[error("WAITING_FOR_OPPONENT")]
    WaitingForOpponent,
    #[error("GAME_ALREADY_OVER")]
    GameAlreadyOver,
    #[error("NOT_YOUR_TURN")]
    NotYourTurn,
    #[error("OUT_OF_BOUNDS")]
    OutOfBounds,
    #[error("ALREADY_OCCUPIED")]
    AlreadyOccupied,
    #[error("GAME_NOT_FINISHED")]
    GameNotFinished,
}

impl Reason {
    /// Rule violations are answered with the current snapshot so the caller
    /// can redraw without a follow-up query. Malformed requests and unknown
    /// tokens are not.
    pub fn carries_state(self) -> bool {
        match self {
            Reason::TokenRequired
            | Reason::InvalidToken
            | Reason::InvalidCoord
            | Reason::InvalidMessage
            | Reason::InvalidRequest => false,
            Reason::NotAPlayer
            | Reason::WaitingForOpponent
            | Reason::GameAlreadyOver
            | Reason::NotYourTurn
            | Reason::OutOfBounds
            | Reason::AlreadyOccupied
            | Reason::GameNotFinished => true,
        }
    }
}

impl From<PlaceError> for Reason {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::OutOfBounds => Reason::OutOfBounds,
            PlaceError::AlreadyOccupied => Reason::AlreadyOccupied,
        }
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("frame of {0} bytes exceeds the {max} byte limit", max = MAX_FRAME_LEN)]
    TooLarge(usize),
    #[error("connection closed by peer")]
    Closed,
}

/// Writes one length-prefixed frame.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge(payload.len()));
    }
    writer.write_u32(payload.len() as u32).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one length-prefixed frame. Returns `Ok(None)` when the peer closed
/// the stream between frames; a close inside the length prefix is an error.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    if reader.read(&mut len_buf[..1]).await? == 0 {
        return Ok(None);
    }
    reader.read_exact(&mut len_buf[1..]).await?;

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge(len));
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

/// Serializes `message` and writes it as one frame.
pub async fn send_message<W, T>(writer: &mut W, message: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = bincode::serialize(message)?;
    write_frame(writer, &payload).await
}

/// Reads one frame and deserializes it. `Ok(None)` on a clean close.
pub async fn recv_message<R, T>(reader: &mut R) -> Result<Option<T>, FrameError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    match read_frame(reader).await? {
        Some(payload) => Ok(Some(bincode::deserialize(&payload)?)),
        None => Ok(None),
    }
}
