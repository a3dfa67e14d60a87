use crate::snapshot::SessionSnapshot;

/// Events broadcast from the session actor to board views.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Full snapshot after any visible state change.
    StateChanged(SessionSnapshot),
    /// The second seat of a shared room was filled.
    OpponentJoined { name: String },
    /// The game reached a terminal position.
    Concluded(SessionSnapshot),
    /// Non-fatal error notification.
    Error(String),
}
