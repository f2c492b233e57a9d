use crate::game::ClientGameState;
use shared::{Snapshot, Stone, Winner, BOARD_SIZE};
use std::fmt::Write;

/// Chat lines shown under the board.
const CHAT_TAIL: usize = 5;

const BLACK_STONE: char = '●';
const WHITE_STONE: char = '○';
const EMPTY_CELL: char = '.';

fn stone_char(cell: Option<Stone>) -> char {
    match cell {
        Some(Stone::Black) => BLACK_STONE,
        Some(Stone::White) => WHITE_STONE,
        None => EMPTY_CELL,
    }
}

/// Board with column indices on top and row indices on the left.
pub fn render_board(snapshot: &Snapshot) -> String {
    let mut out = String::from("   ");
    for x in 0..BOARD_SIZE {
        let _ = write!(out, "{:>3}", x);
    }
    out.push('\n');

    for y in 0..BOARD_SIZE {
        let _ = write!(out, "{:>3}", y);
        for x in 0..BOARD_SIZE {
            let _ = write!(out, "{:>3}", stone_char(snapshot.cell(x, y)));
        }
        out.push('\n');
    }
    out
}

pub fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.winner {
        Some(Winner::Black) => "Black wins!".to_string(),
        Some(Winner::White) => "White wins!".to_string(),
        Some(Winner::Draw) => "Draw!".to_string(),
        None if !snapshot.players.ready => "Waiting for opponent...".to_string(),
        None => match snapshot.turn {
            Stone::Black => "Turn: Black".to_string(),
            Stone::White => "Turn: White".to_string(),
        },
    }
}

fn vote_line(snapshot: &Snapshot) -> String {
    let mark = |voted: bool| if voted { "yes" } else { "no" };
    format!(
        "Restart votes: black {}, white {}",
        mark(snapshot.restart.black),
        mark(snapshot.restart.white)
    )
}

/// Full screen for the current client state.
pub fn render(state: &ClientGameState) -> String {
    let mut out = String::new();

    match state.seat {
        Some(seat) => {
            let _ = writeln!(out, "You are {} ({})", seat, state.name);
        }
        None => {
            let _ = writeln!(out, "Not joined ({})", state.name);
        }
    }

    if let Some(snapshot) = &state.snapshot {
        out.push_str(&render_board(snapshot));
        let _ = writeln!(out, "{}  (moves: {})", status_line(snapshot), snapshot.move_count);
        if state.is_my_turn() {
            let _ = writeln!(out, "Your move.");
        }
        if snapshot.is_finished() {
            let _ = writeln!(out, "{}", vote_line(snapshot));
            if state.can_restart() {
                let _ = writeln!(out, "Type 'r' to ask for a rematch.");
            }
        }

        let skip = snapshot.chat.len().saturating_sub(CHAT_TAIL);
        for entry in snapshot.chat.iter().skip(skip) {
            let _ = writeln!(out, "[{}] {}", entry.name, entry.text);
        }
    }

    if let Some(status) = &state.status {
        let _ = writeln!(out, "{}", status);
    }
    out
}
