//! Bridge between local position state and the shared room record.
//!
//! The only component that touches shared mutable state. The store offers
//! plain get/set with no compare-and-swap, so pushes are last-writer-wins
//! by design: a concurrent push can be silently lost, and the losing side
//! snaps to the winning position on its next poll.

use chess::PlayerSide;
use roomstore::{RoomRecord, SharedStore, StoreError};

/// Outcome of opening a room: the caller's fixed seat and the position to
/// load into local state.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub assigned: PlayerSide,
    pub fen: String,
    /// Seat 1's name when joining an existing room.
    pub opponent_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("room {0} is full")]
    RoomFull(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Synchronizer {
    store: Box<dyn SharedStore>,
    room_id: String,
    key: String,
}

impl Synchronizer {
    pub fn new(store: Box<dyn SharedStore>, room_id: impl Into<String>) -> Self {
        let room_id = room_id.into();
        let key = RoomRecord::key(&room_id);
        Self {
            store,
            room_id,
            key,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// First opener creates the record and takes seat 1 (white). The next
    /// caller takes seat 2 (black) and inherits the in-progress position.
    /// A third caller is refused without touching the record.
    pub fn join_or_create(
        &self,
        display_name: &str,
        start_fen: &str,
    ) -> Result<JoinOutcome, SyncError> {
        match self.read()? {
            None => {
                let record = RoomRecord {
                    fen: start_fen.to_string(),
                    player1: display_name.to_string(),
                    player2: None,
                    turn: PlayerSide::White.as_str().to_string(),
                };
                self.write(&record)?;
                tracing::info!(room = %self.room_id, "Created room, waiting for opponent");
                Ok(JoinOutcome {
                    assigned: PlayerSide::White,
                    fen: start_fen.to_string(),
                    opponent_name: None,
                })
            }
            Some(mut record) if record.player2.is_none() => {
                record.player2 = Some(display_name.to_string());
                self.write(&record)?;
                tracing::info!(room = %self.room_id, "Joined room as second player");
                Ok(JoinOutcome {
                    assigned: PlayerSide::Black,
                    fen: record.fen,
                    opponent_name: Some(record.player1),
                })
            }
            Some(_) => Err(SyncError::RoomFull(self.room_id.clone())),
        }
    }

    /// Overwrite the shared position. Read-modify-write with no version
    /// check; pushing against a vanished record is a no-op.
    pub fn push(&self, fen: &str, side_to_move: PlayerSide) -> Result<(), SyncError> {
        let Some(mut record) = self.read()? else {
            return Ok(());
        };
        record.fen = fen.to_string();
        record.turn = side_to_move.as_str().to_string();
        self.write(&record)
    }

    /// Read-only fetch of the current record.
    pub fn poll(&self) -> Result<Option<RoomRecord>, SyncError> {
        self.read()
    }

    fn read(&self) -> Result<Option<RoomRecord>, SyncError> {
        match self.store.get(&self.key)? {
            Some(json) => Ok(Some(RoomRecord::from_json(&json)?)),
            None => Ok(None),
        }
    }

    fn write(&self, record: &RoomRecord) -> Result<(), SyncError> {
        self.store.set(&self.key, &record.to_json()?)?;
        Ok(())
    }
}
