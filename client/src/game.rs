use log::{debug, info};
use shared::{Response, RestartStatus, Seat, Snapshot, Stone};

/// Everything the client knows about its own session and the last snapshot
/// the server sent.
#[derive(Debug, Clone)]
pub struct ClientGameState {
    pub name: String,
    pub token: Option<String>,
    pub seat: Option<Seat>,
    pub snapshot: Option<Snapshot>,
    /// Feedback from the most recent request, shown under the board.
    pub status: Option<String>,
}

impl ClientGameState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            token: None,
            seat: None,
            snapshot: None,
            status: None,
        }
    }

    /// Folds a server response into the local state. Returns whether anything
    /// visible changed, so state polls only trigger a redraw when needed.
    pub fn apply(&mut self, response: &Response) -> bool {
        match response {
            Response::Joined { seat, token, state } => {
                info!("Joined as {}", seat);
                self.seat = Some(*seat);
                self.token = Some(token.clone());
                self.snapshot = Some(state.clone());
                self.status = Some(format!("Joined as {}", seat));
                true
            }
            Response::Moved { outcome, state } => {
                debug!("Move accepted: {}", outcome);
                self.snapshot = Some(state.clone());
                self.status = None;
                true
            }
            Response::Bye => {
                self.token = None;
                self.seat = None;
                self.status = Some("Goodbye".to_string());
                true
            }
            Response::State { state } => self.replace_snapshot(state),
            Response::Restart { status, state } => {
                self.snapshot = Some(state.clone());
                self.status = Some(match status {
                    RestartStatus::Pending => "Restart requested, waiting for opponent",
                    RestartStatus::Restarted => "New game started",
                }
                .to_string());
                true
            }
            Response::Chat { chat } => {
                if let Some(snapshot) = self.snapshot.as_mut() {
                    snapshot.chat = chat.clone();
                }
                true
            }
            Response::Failure { reason, state } => {
                debug!("Request refused: {}", reason);
                if let Some(state) = state {
                    self.snapshot = Some(state.clone());
                }
                self.status = Some(format!("Error: {}", reason));
                true
            }
        }
    }

    fn replace_snapshot(&mut self, state: &Snapshot) -> bool {
        if self.snapshot.as_ref() == Some(state) {
            return false;
        }
        self.snapshot = Some(state.clone());
        true
    }

    pub fn my_stone(&self) -> Option<Stone> {
        self.seat.and_then(|seat| seat.stone())
    }

    pub fn is_my_turn(&self) -> bool {
        match (self.my_stone(), &self.snapshot) {
            (Some(stone), Some(snapshot)) => {
                snapshot.players.ready && !snapshot.is_finished() && snapshot.turn == stone
            }
            _ => false,
        }
    }

    /// A seated player may ask for a rematch once the game is over, once.
    pub fn can_restart(&self) -> bool {
        self.my_stone().is_some()
            && !self.has_voted()
            && self
                .snapshot
                .as_ref()
                .map(Snapshot::is_finished)
                .unwrap_or(false)
    }

    pub fn has_voted(&self) -> bool {
        match (self.seat, &self.snapshot) {
            (Some(seat), Some(snapshot)) => snapshot.restart.for_seat(seat),
            _ => false,
        }
    }
}
