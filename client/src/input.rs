//! Parsing of the line-oriented commands typed at the terminal.

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  m|move X Y   place a stone at column X, row Y
  s|state      refresh the board
  r|restart    ask for a rematch after the game ends
  c|chat TEXT  send a chat message
  h|help       show this help
  q|quit       leave the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Move { x: i64, y: i64 },
    State,
    Restart,
    Chat(String),
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'h' for help")]
    Unknown(String),
    #[error("usage: move X Y")]
    BadMove,
    #[error("usage: chat TEXT")]
    EmptyChat,
}

pub fn parse_command(line: &str) -> Result<UserCommand, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(InputError::Empty),
        "m" | "move" => {
            let mut parts = rest.split_whitespace().map(str::parse::<i64>);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(x)), Some(Ok(y)), None) => Ok(UserCommand::Move { x, y }),
                _ => Err(InputError::BadMove),
            }
        }
        "s" | "state" => Ok(UserCommand::State),
        "r" | "restart" => Ok(UserCommand::Restart),
        "c" | "chat" => {
            if rest.is_empty() {
                Err(InputError::EmptyChat)
            } else {
                Ok(UserCommand::Chat(rest.to_string()))
            }
        }
        "q" | "quit" | "exit" => Ok(UserCommand::Quit),
        "h" | "help" | "?" => Ok(UserCommand::Help),
        other => Err(InputError::Unknown(other.to_string())),
    }
}
