//! Turn arbitration: decides whether local input may act right now.

use chess::PlayerSide;

/// Mode-specific facts the arbiter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnMode {
    /// Scripted opponent; the human owns one fixed side.
    Local { bot_pending: bool },
    /// Remote opponent through the shared store.
    Shared { opponent_present: bool },
}

/// Everything the decision needs, gathered by the caller.
/// The arbiter itself owns no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct TurnFacts {
    /// The local participant's fixed side; None while unassigned.
    pub assigned: Option<PlayerSide>,
    pub side_to_move: PlayerSide,
    pub mode: TurnMode,
    pub concluded: bool,
}

/// Whether the local user is permitted to move.
pub fn may_move(facts: &TurnFacts) -> bool {
    if facts.concluded {
        return false;
    }
    let Some(assigned) = facts.assigned else {
        return false;
    };
    if assigned != facts.side_to_move {
        return false;
    }
    match facts.mode {
        TurnMode::Local { bot_pending } => !bot_pending,
        TurnMode::Shared { opponent_present } => opponent_present,
    }
}
