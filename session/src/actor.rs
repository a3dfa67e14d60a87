use tokio::sync::{broadcast, mpsc};
use tokio::time;
use tracing::Instrument;

use crate::commands::SessionCommand;
use crate::events::SessionEvent;
use crate::state::{IntentOutcome, SessionState};
use crate::{BOT_DELAY, POLL_INTERVAL};

/// The session actor loop. Owns all mutable state; commands, the scripted
/// reply delay, and the reconciliation poll all resolve on this one task,
/// so at most one handler runs at a time.
pub(crate) async fn run_session_actor(
    state: SessionState,
    cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
) {
    let label = state.session_label();
    run_session_actor_inner(state, cmd_rx, event_tx)
        .instrument(tracing::info_span!("session", id = %label))
        .await;
}

async fn run_session_actor_inner(
    mut state: SessionState,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
) {
    tracing::info!("Session actor started");

    let mut poll_interval = time::interval(POLL_INTERVAL);
    poll_interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
    let is_shared = state.is_shared();

    // Deadline for the pending scripted reply. Owned here so that session
    // teardown invalidates it along with the poll interval.
    let mut bot_deadline: Option<time::Instant> = None;

    loop {
        tokio::select! {
            biased;

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(SessionCommand::Shutdown) | None => {
                        tracing::info!("Session actor shutting down");
                        break;
                    }
                    Some(cmd) => handle_command(&mut state, cmd, &mut bot_deadline, &event_tx),
                }
            }

            _ = time::sleep_until(bot_deadline.unwrap_or_else(time::Instant::now)), if bot_deadline.is_some() => {
                bot_deadline = None;
                fire_bot_reply(&mut state, &event_tx);
            }

            _ = poll_interval.tick(), if is_shared => {
                run_poll_cycle(&mut state, &event_tx);
            }
        }
    }

    tracing::info!("Session actor exited");
}

fn handle_command(
    state: &mut SessionState,
    cmd: SessionCommand,
    bot_deadline: &mut Option<time::Instant>,
    event_tx: &broadcast::Sender<SessionEvent>,
) {
    match cmd {
        SessionCommand::SquareIntent { square, reply } => {
            match state.handle_square_intent(square) {
                IntentOutcome::Moved => after_move(state, bot_deadline, event_tx),
                IntentOutcome::Armed | IntentOutcome::Cleared => {
                    let _ = event_tx.send(SessionEvent::StateChanged(state.snapshot()));
                }
                IntentOutcome::Ignored => {}
            }
            let _ = reply.send(state.snapshot());
        }
        SessionCommand::DirectMove { from, to, reply } => {
            let applied = state.handle_direct_move(from, to);
            if applied {
                after_move(state, bot_deadline, event_tx);
            }
            let _ = reply.send((applied, state.snapshot()));
        }
        SessionCommand::GetSnapshot { reply } => {
            let _ = reply.send(state.snapshot());
        }
        SessionCommand::Subscribe { reply } => {
            let _ = reply.send((state.snapshot(), event_tx.subscribe()));
        }
        // Intercepted by the actor loop before dispatch.
        SessionCommand::Shutdown => {}
    }
}

/// Post-move step: push in shared mode, schedule the scripted reply in
/// local mode, then broadcast the new state.
fn after_move(
    state: &mut SessionState,
    bot_deadline: &mut Option<time::Instant>,
    event_tx: &broadcast::Sender<SessionEvent>,
) {
    if state.is_shared() {
        if let Err(e) = state.push_position() {
            // Dropped deliberately; the next successful poll corrects it.
            tracing::warn!("Push failed, relying on next poll: {e}");
        }
    } else if !state.concluded && state.assigned != Some(state.game.side_to_move()) {
        state.bot_pending = true;
        *bot_deadline = Some(time::Instant::now() + BOT_DELAY);
        tracing::debug!("Scheduled scripted reply");
    }

    let _ = event_tx.send(SessionEvent::StateChanged(state.snapshot()));
    if state.concluded {
        let _ = event_tx.send(SessionEvent::Concluded(state.snapshot()));
    }
}

fn fire_bot_reply(state: &mut SessionState, event_tx: &broadcast::Sender<SessionEvent>) {
    state.bot_pending = false;
    if state.concluded {
        // Single-threaded scheduling should make this unreachable.
        tracing::error!("Scripted reply fired on a concluded game");
        return;
    }
    match state.bot_reply() {
        Ok(()) => {
            let _ = event_tx.send(SessionEvent::StateChanged(state.snapshot()));
            if state.concluded {
                let _ = event_tx.send(SessionEvent::Concluded(state.snapshot()));
            }
        }
        Err(e) => {
            tracing::error!("Scripted reply failed: {e}");
            let _ = event_tx.send(SessionEvent::Error(e.to_string()));
        }
    }
}

fn run_poll_cycle(state: &mut SessionState, event_tx: &broadcast::Sender<SessionEvent>) {
    match state.poll_record() {
        Ok(Some(record)) => {
            let outcome = state.reconcile(&record);
            if let Some(name) = &outcome.opponent_joined {
                let _ = event_tx.send(SessionEvent::OpponentJoined { name: name.clone() });
            }
            if outcome.opponent_joined.is_some() || outcome.position_changed {
                let _ = event_tx.send(SessionEvent::StateChanged(state.snapshot()));
            }
            if outcome.position_changed && state.concluded {
                let _ = event_tx.send(SessionEvent::Concluded(state.snapshot()));
            }
        }
        Ok(None) => {}
        Err(e) => {
            // Transient store trouble; the next interval retries.
            tracing::debug!("Poll failed: {e}");
        }
    }
}
