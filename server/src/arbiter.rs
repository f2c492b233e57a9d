//! Request arbiter: the single entry point to the shared game state.
//!
//! The match, the session registry, the restart votes and the chat log are
//! owned together by one [`Lobby`] behind one mutex. Every operation,
//! including plain state reads, runs start to finish under that lock, so a
//! decision such as "is it this token's turn" always sees the registry and
//! the match at the same instant. Nothing inside the lock awaits; I/O
//! happens in the transport before and after.

use crate::chat::ChatLog;
use crate::game::Match;
use crate::restart::RestartVotes;
use crate::session::{SessionRegistry, Token};
use log::debug;
use shared::{ChatEntry, MoveOutcome, Reason, Request, Response, RestartStatus, Seat, Snapshot};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A validated request. Built from a wire [`Request`] at the boundary; the
/// arbiter never sees missing tokens. Move coordinates stay optional so a
/// missing one is reported only after the token has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { name: String },
    Move {
        token: Token,
        x: Option<i64>,
        y: Option<i64>,
    },
    Quit { token: Token },
    State,
    Restart { token: Token },
    Chat { token: Token, text: String },
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Join { .. } => "join",
            Command::Move { .. } => "move",
            Command::Quit { .. } => "quit",
            Command::State => "state",
            Command::Restart { .. } => "restart",
            Command::Chat { .. } => "chat",
        }
    }
}

fn require_token(token: Option<String>) -> Result<Token, Reason> {
    match token {
        Some(token) if !token.is_empty() => Ok(Token::from(token)),
        _ => Err(Reason::TokenRequired),
    }
}

impl TryFrom<Request> for Command {
    type Error = Reason;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        match request {
            Request::Join { name } => Ok(Command::Join {
                name: name.unwrap_or_default(),
            }),
            Request::Move { token, x, y } => Ok(Command::Move {
                token: require_token(token)?,
                x,
                y,
            }),
            Request::Quit { token } => Ok(Command::Quit {
                token: require_token(token)?,
            }),
            Request::State => Ok(Command::State),
            Request::Restart { token } => Ok(Command::Restart {
                token: require_token(token)?,
            }),
            Request::Chat { token, text } => {
                let token = require_token(token)?;
                let text = text.ok_or(Reason::InvalidMessage)?;
                Ok(Command::Chat { token, text })
            }
        }
    }
}

/// Everything the service shares between connections.
#[derive(Debug, Default)]
pub struct Lobby {
    game: Match,
    sessions: SessionRegistry,
    votes: RestartVotes,
    chat: ChatLog,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        let view = self.game.snapshot();
        Snapshot {
            board: view.board,
            turn: view.turn,
            winner: view.winner,
            move_count: view.move_count,
            players: self.sessions.presence(),
            restart: self.votes.flags(&self.sessions),
            chat: self.chat.recent(),
        }
    }

    pub fn join(&mut self, name: &str) -> (Seat, Token) {
        let session = self.sessions.join(name);
        (session.seat, session.token)
    }

    /// Places a stone for `token`.
    ///
    /// Checks run in a fixed order: token known, token seated, coordinates
    /// present, both seats filled, match not over, token's turn, then the
    /// board's own checks.
    pub fn play(
        &mut self,
        token: &Token,
        x: Option<i64>,
        y: Option<i64>,
    ) -> Result<MoveOutcome, Reason> {
        let session = self.sessions.lookup(token)?;
        let stone = session.seat.stone().ok_or(Reason::NotAPlayer)?;
        let (Some(x), Some(y)) = (x, y) else {
            return Err(Reason::InvalidCoord);
        };

        if !self.sessions.is_ready() {
            return Err(Reason::WaitingForOpponent);
        }
        if self.game.is_finished() {
            return Err(Reason::GameAlreadyOver);
        }
        if self.game.turn() != stone {
            return Err(Reason::NotYourTurn);
        }

        self.game.apply_move(stone, x, y)
    }

    /// Ends a session. Unknown tokens are ignored.
    pub fn quit(&mut self, token: &Token) {
        self.votes.withdraw(token);
        self.sessions.quit(token);
    }

    pub fn restart(&mut self, token: &Token) -> Result<RestartStatus, Reason> {
        self.votes.request(token, &mut self.game, &self.sessions)
    }

    pub fn chat(&mut self, token: &Token, text: &str) -> Result<Vec<ChatEntry>, Reason> {
        let name = self.sessions.lookup(token)?.name.clone();
        self.chat.append(&name, text);
        Ok(self.chat.recent())
    }

    /// Runs one command and packages the result for the caller.
    pub fn handle(&mut self, command: Command) -> Response {
        let result = match command {
            Command::Join { name } => {
                let (seat, token) = self.join(&name);
                Ok(Response::Joined {
                    seat,
                    token: token.to_string(),
                    state: self.snapshot(),
                })
            }
            Command::Move { token, x, y } => self
                .play(&token, x, y)
                .map(|outcome| Response::Moved {
                    outcome,
                    state: self.snapshot(),
                }),
            Command::Quit { token } => {
                self.quit(&token);
                Ok(Response::Bye)
            }
            Command::State => Ok(Response::State {
                state: self.snapshot(),
            }),
            Command::Restart { token } => {
                self.restart(&token)
                    .map(|status| Response::Restart {
                        status,
                        state: self.snapshot(),
                    })
            }
            Command::Chat { token, text } => {
                self.chat(&token, &text).map(|chat| Response::Chat { chat })
            }
        };

        result.unwrap_or_else(|reason| {
            debug!("Request refused: {}", reason);
            let state = reason.carries_state().then(|| self.snapshot());
            Response::Failure { reason, state }
        })
    }
}

/// Cloneable handle to the shared [`Lobby`]; one clone per connection.
#[derive(Debug, Clone, Default)]
pub struct Arbiter {
    lobby: Arc<Mutex<Lobby>>,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `command` inside the exclusive section.
    pub async fn dispatch(&self, command: Command) -> Response {
        debug!("Dispatch {}", command.kind());
        let mut lobby = self.lobby.lock().await;
        lobby.handle(command)
    }

    pub async fn join(&self, name: &str) -> Response {
        self.dispatch(Command::Join {
            name: name.to_string(),
        })
        .await
    }

    pub async fn play(&self, token: &Token, x: i64, y: i64) -> Response {
        self.dispatch(Command::Move {
            token: token.clone(),
            x: Some(x),
            y: Some(y),
        })
        .await
    }

    pub async fn quit(&self, token: &Token) -> Response {
        self.dispatch(Command::Quit {
            token: token.clone(),
        })
        .await
    }

    pub async fn state(&self) -> Response {
        self.dispatch(Command::State).await
    }

    pub async fn restart(&self, token: &Token) -> Response {
        self.dispatch(Command::Restart {
            token: token.clone(),
        })
        .await
    }

    pub async fn chat(&self, token: &Token, text: &str) -> Response {
        self.dispatch(Command::Chat {
            token: token.clone(),
            text: text.to_string(),
        })
        .await
    }

    /// Validates a wire request and runs it.
    pub async fn handle_request(&self, request: Request) -> Response {
        match Command::try_from(request) {
            Ok(command) => self.dispatch(command).await,
            Err(reason) => Response::Failure {
                reason,
                state: None,
            },
        }
    }
}
