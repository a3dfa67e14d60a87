//! Plain-text board rendering from a session snapshot.

use chess::{DisplayBoard, PlayerSide};
use cozy_chess::{File, Rank, Square};
use session::SessionSnapshot;

/// Render the board plus a status footer. The board is drawn from the
/// snapshot's orientation, highlights marked with parentheses.
pub fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    match DisplayBoard::from_fen(&snapshot.fen) {
        Ok(board) => render_board(&mut out, &board, snapshot),
        Err(e) => {
            out.push_str(&format!("<unrenderable position: {e}>\n"));
        }
    }

    out.push_str(&status_line(snapshot));
    out.push('\n');
    out
}

fn render_board(out: &mut String, board: &DisplayBoard, snapshot: &SessionSnapshot) {
    let flipped = snapshot.board_orientation == PlayerSide::Black;
    for row in 0..8u8 {
        let rank = if flipped { row } else { 7 - row };
        out.push_str(&format!("{} ", rank + 1));
        for col in 0..8u8 {
            let file = if flipped { 7 - col } else { col };
            let square = Square::new(File::index(file as usize), Rank::index(rank as usize));
            let piece = board.piece_at(file, rank).unwrap_or('.');
            if snapshot.highlighted.contains(&square) {
                out.push_str(&format!("({piece})"));
            } else {
                out.push_str(&format!(" {piece} "));
            }
        }
        out.push('\n');
    }
    out.push_str("  ");
    for col in 0..8u8 {
        let file = if flipped { 7 - col } else { col };
        out.push_str(&format!(" {} ", (b'a' + file) as char));
    }
    out.push('\n');
}

fn status_line(snapshot: &SessionSnapshot) -> String {
    if snapshot.concluded {
        return match snapshot.status {
            cozy_chess::GameStatus::Won => {
                format!("Game over: {} wins", snapshot.side_to_move.opposite())
            }
            cozy_chess::GameStatus::Drawn => "Game over: draw".to_string(),
            cozy_chess::GameStatus::Ongoing => "Game over".to_string(),
        };
    }
    if snapshot.waiting_for_opponent {
        return "Waiting for an opponent to join...".to_string();
    }
    if snapshot.bot_thinking {
        return format!(
            "{} is thinking...",
            snapshot.opponent_name.as_deref().unwrap_or("Opponent")
        );
    }
    if snapshot.interaction_enabled {
        format!("Your move ({})", snapshot.side_to_move)
    } else {
        format!(
            "Waiting for {} ({})",
            snapshot.opponent_name.as_deref().unwrap_or("opponent"),
            snapshot.side_to_move
        )
    }
}
