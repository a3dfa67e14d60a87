use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Shared state for one room, serialized as a flat JSON field map.
///
/// `fen` is the single source of truth all participants converge toward.
/// Seat 1 is the room creator (white); seat 2 is filled by the joiner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub fen: String,
    pub player1: String,
    pub player2: Option<String>,
    /// Side to move, "white" or "black". Written on every update; readers
    /// trust the FEN's own side-to-move field instead.
    pub turn: String,
}

impl RoomRecord {
    /// Store key for a room identifier.
    pub fn key(room_id: &str) -> String {
        format!("room_{room_id}")
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
