use cozy_chess::Square;
use tokio::sync::{broadcast, oneshot};

use crate::events::SessionEvent;
use crate::snapshot::SessionSnapshot;
use crate::sync::SyncError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("room {0} is full")]
    RoomFull(String),
    #[error("invalid shared position: {0}")]
    InvalidPosition(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SyncError> for SessionError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::RoomFull(room) => Self::RoomFull(room),
            SyncError::Store(e) => Self::Store(e.to_string()),
        }
    }
}

/// Commands sent to the session actor. Each embeds a oneshot for the reply.
pub enum SessionCommand {
    /// Square-click input (two-phase select/target protocol). Always
    /// replies with the post-handling snapshot; ignored input replies with
    /// an unchanged one.
    SquareIntent {
        square: Square,
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Drag-and-drop input. Replies whether the move was applied.
    DirectMove {
        from: Square,
        to: Square,
        reply: oneshot::Sender<(bool, SessionSnapshot)>,
    },
    GetSnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Subscribe {
        reply: oneshot::Sender<(SessionSnapshot, broadcast::Receiver<SessionEvent>)>,
    },
    Shutdown,
}
