//! Game session coordination.
//!
//! One actor per client owns the authoritative position, arbitrates turns,
//! schedules the scripted opponent's delayed reply, and reconciles against
//! the shared room record. Board views talk to it through a [`SessionHandle`]
//! and a broadcast event stream; nothing else touches session state.

mod actor;
mod arbiter;
mod commands;
mod events;
mod handle;
mod intent;
mod snapshot;
mod state;
mod sync;

pub use commands::SessionError;
pub use events::SessionEvent;
pub use handle::SessionHandle;
pub use snapshot::SessionSnapshot;

use std::time::Duration;

use bot::Difficulty;
use chess::Game;
use roomstore::SharedStore;
use tokio::sync::{broadcast, mpsc};

use state::SessionState;
use sync::Synchronizer;

/// Delay before the scripted opponent replies.
pub const BOT_DELAY: Duration = Duration::from_millis(500);

/// Interval between reconciliation polls in shared sessions.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Start a local session against the scripted opponent. The human plays
/// white from the standard starting position.
pub fn spawn_local(
    display_name: impl Into<String>,
    difficulty: Difficulty,
) -> (SessionHandle, broadcast::Receiver<SessionEvent>) {
    spawn(SessionState::new_local(display_name.into(), difficulty))
}

/// Join or create a shared room, then start the session actor.
///
/// The first opener takes white and waits; a joiner takes black and
/// inherits the room's current position. A full room fails here and no
/// actor is spawned.
pub fn spawn_shared(
    display_name: impl Into<String>,
    room_id: impl Into<String>,
    store: Box<dyn SharedStore>,
) -> Result<(SessionHandle, broadcast::Receiver<SessionEvent>), SessionError> {
    let display_name = display_name.into();
    let sync = Synchronizer::new(store, room_id);

    let outcome = sync.join_or_create(&display_name, &Game::new().to_fen())?;
    let game = Game::from_fen(&outcome.fen)
        .map_err(|e| SessionError::InvalidPosition(e.to_string()))?;

    let state = SessionState::new_shared(
        display_name,
        game,
        outcome.assigned,
        outcome.opponent_name,
        sync,
    );
    Ok(spawn(state))
}

fn spawn(state: SessionState) -> (SessionHandle, broadcast::Receiver<SessionEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (event_tx, event_rx) = broadcast::channel(100);
    tokio::spawn(actor::run_session_actor(state, cmd_rx, event_tx));
    (SessionHandle::new(cmd_tx), event_rx)
}
