//! Session registry: who is connected, under which token, in which seat.
//!
//! This module handles:
//! - Seat assignment on join (black first, then white, then spectator)
//! - Token generation and lookup
//! - Seat vacating on quit, guarded against stale double-quits
//!
//! The registry owns the token → session map and the two-entry seat table;
//! the two are only ever changed together, so a seat is occupied exactly when
//! its token has a live session in that seat.

use log::info;
use rand::Rng;
use shared::{Reason, Seat, SeatPresence, Stone, MAX_NAME_LEN};
use std::collections::HashMap;
use std::fmt;

/// Fallback display name for joins without one.
pub const DEFAULT_NAME: &str = "player";

/// Opaque session credential: 128 random bits rendered as 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Draws a fresh token from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let bits: u128 = rand::thread_rng().gen();
        Token(format!("{:032x}", bits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First six characters, for log lines.
    pub fn short(&self) -> &str {
        self.0.get(..6).unwrap_or(&self.0)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A joined participant.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Token,
    pub name: String,
    pub seat: Seat,
}

/// Trims a requested display name, falls back to [`DEFAULT_NAME`] and caps it
/// at [`MAX_NAME_LEN`] characters.
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_LEN).collect()
}

/// Maps tokens to sessions and tracks which token holds each playing seat.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Token, Session>,
    black: Option<Token>,
    white: Option<Token>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new participant in the first vacant seat.
    ///
    /// Black is always scanned before white, so the assignment depends only
    /// on which seats are free. When both are taken the participant becomes a
    /// spectator; joining never fails.
    pub fn join(&mut self, name: &str) -> Session {
        let seat = self.vacant_seat();
        let token = self.fresh_token();
        let session = Session {
            token: token.clone(),
            name: display_name(name),
            seat,
        };

        match seat {
            Seat::Black => self.black = Some(token.clone()),
            Seat::White => self.white = Some(token.clone()),
            Seat::Spectator => {}
        }

        info!(
            "Join: name={} seat={} token={}...",
            session.name,
            seat,
            token.short()
        );
        self.sessions.insert(token, session.clone());
        session
    }

    /// Removes a session and frees its seat.
    ///
    /// The seat is only cleared if it is still held by this very token, so a
    /// repeated quit can never evict a newer occupant. Returns the removed
    /// session, or `None` if the token was unknown.
    pub fn quit(&mut self, token: &Token) -> Option<Session> {
        let session = self.sessions.remove(token)?;

        let slot = match session.seat {
            Seat::Black => Some(&mut self.black),
            Seat::White => Some(&mut self.white),
            Seat::Spectator => None,
        };
        if let Some(slot) = slot {
            if slot.as_ref() == Some(token) {
                *slot = None;
            }
        }

        info!(
            "Quit: name={} seat={} token={}...",
            session.name,
            session.seat,
            token.short()
        );
        Some(session)
    }

    pub fn lookup(&self, token: &Token) -> Result<&Session, Reason> {
        self.sessions.get(token).ok_or(Reason::InvalidToken)
    }

    /// The token currently holding the seat for `stone`.
    pub fn occupant(&self, stone: Stone) -> Option<&Token> {
        match stone {
            Stone::Black => self.black.as_ref(),
            Stone::White => self.white.as_ref(),
        }
    }

    /// Both playing seats are occupied.
    pub fn is_ready(&self) -> bool {
        self.black.is_some() && self.white.is_some()
    }

    pub fn presence(&self) -> SeatPresence {
        SeatPresence {
            black: self.black.is_some(),
            white: self.white.is_some(),
            ready: self.is_ready(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn vacant_seat(&self) -> Seat {
        if self.black.is_none() {
            Seat::Black
        } else if self.white.is_none() {
            Seat::White
        } else {
            Seat::Spectator
        }
    }

    fn fresh_token(&self) -> Token {
        loop {
            let token = Token::generate();
            if !self.sessions.contains_key(&token) {
                return token;
            }
        }
    }
}
