use chess::PlayerSide;
use cozy_chess::{GameStatus, Square};

/// Complete, immutable view of session state.
///
/// Doubles as the board view's render directive: position, highlighted
/// squares, whether interaction is enabled, and board orientation.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub fen: String,
    pub side_to_move: PlayerSide,
    /// The local participant's fixed side.
    pub assigned: Option<PlayerSide>,
    pub display_name: String,
    /// Opponent label: the remote player's name, or the bot tier.
    pub opponent_name: Option<String>,
    /// Seat 2 of a shared room is still empty.
    pub waiting_for_opponent: bool,
    /// A scripted reply is pending.
    pub bot_thinking: bool,
    pub concluded: bool,
    pub status: GameStatus,
    /// Armed origin plus its candidate targets.
    pub highlighted: Vec<Square>,
    /// Whether the view should accept move input right now.
    pub interaction_enabled: bool,
    pub board_orientation: PlayerSide,
}
