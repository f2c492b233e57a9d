//! Two-party rematch consensus.
//!
//! After a match ends, each seated player may vote for a rematch. The match
//! is reset only once the tokens currently holding *both* seats have voted.
//! Votes are keyed by token, and agreement is always evaluated against the
//! present seat occupants: if a player quits and someone else takes the
//! colour, the newcomer starts with no vote.

use crate::game::Match;
use crate::session::{SessionRegistry, Token};
use log::info;
use shared::{Reason, RestartStatus, Stone, VoteFlags};
use std::collections::HashSet;

/// Where the consensus stands for the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The match has no result yet; votes are not accepted.
    Playing,
    /// The match is over and at most one current occupant has voted.
    AwaitingVotes,
    /// Both current occupants have voted. Transient: resolved immediately
    /// by resetting the match.
    BothAgreed,
}

#[derive(Debug, Default)]
pub struct RestartVotes {
    votes: HashSet<Token>,
}

impl RestartVotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, game: &Match, sessions: &SessionRegistry) -> Phase {
        if !game.is_finished() {
            Phase::Playing
        } else if self.has_voted(Stone::Black, sessions) && self.has_voted(Stone::White, sessions)
        {
            Phase::BothAgreed
        } else {
            Phase::AwaitingVotes
        }
    }

    /// Records a rematch vote from `token`.
    ///
    /// Fails with `NOT_A_PLAYER` unless the token holds a playing seat and
    /// with `GAME_NOT_FINISHED` while the match is still running. When the
    /// vote completes the agreement, the vote set is cleared and the match
    /// reset in the same step.
    pub fn request(
        &mut self,
        token: &Token,
        game: &mut Match,
        sessions: &SessionRegistry,
    ) -> Result<RestartStatus, Reason> {
        let seat = match sessions.lookup(token) {
            Ok(session) if session.seat.is_player() => session.seat,
            _ => return Err(Reason::NotAPlayer),
        };
        if !game.is_finished() {
            return Err(Reason::GameNotFinished);
        }

        self.votes.insert(token.clone());

        let status = match self.phase(game, sessions) {
            Phase::BothAgreed => {
                self.votes.clear();
                game.reset();
                RestartStatus::Restarted
            }
            Phase::AwaitingVotes | Phase::Playing => RestartStatus::Pending,
        };

        info!("Restart vote from {} ({}...): {}", seat, token.short(), status);
        Ok(status)
    }

    /// Drops any vote held by `token`. Called when the token quits.
    pub fn withdraw(&mut self, token: &Token) {
        self.votes.remove(token);
    }

    /// Per-seat vote flags for the current occupants.
    pub fn flags(&self, sessions: &SessionRegistry) -> VoteFlags {
        VoteFlags {
            black: self.has_voted(Stone::Black, sessions),
            white: self.has_voted(Stone::White, sessions),
        }
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    fn has_voted(&self, stone: Stone, sessions: &SessionRegistry) -> bool {
        sessions
            .occupant(stone)
            .is_some_and(|token| self.votes.contains(token))
    }
}
