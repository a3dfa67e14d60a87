use bot::Difficulty;
use chess::{Game, PlayerSide};
use cozy_chess::{Move, Square};
use roomstore::RoomRecord;

use crate::arbiter::{self, TurnFacts, TurnMode};
use crate::commands::SessionError;
use crate::intent::MoveIntent;
use crate::snapshot::SessionSnapshot;
use crate::sync::{SyncError, Synchronizer};

/// Internal mutable state, owned entirely by the session actor. No locks.
pub(crate) struct SessionState {
    pub display_name: String,
    pub game: Game,
    pub intent: MoveIntent,
    /// Fixed for the session lifetime once set; never reassigned.
    pub assigned: Option<PlayerSide>,
    pub opponent_name: Option<String>,
    pub mode: ModeState,
    pub concluded: bool,
    /// A scripted reply is scheduled but has not fired yet (local mode).
    pub bot_pending: bool,
}

/// What a session does after a local move and which facts the arbiter
/// reads, per mode.
pub(crate) enum ModeState {
    Local { difficulty: Difficulty },
    Shared { sync: Synchronizer },
}

/// How a square-intent was absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntentOutcome {
    /// Input ignored; nothing changed.
    Ignored,
    /// Intent armed on an origin (fresh selection or pivot).
    Armed,
    /// An armed intent was dropped without a move.
    Cleared,
    /// A move was applied.
    Moved,
}

/// What a reconciliation pass changed.
#[derive(Debug, Default)]
pub(crate) struct ReconcileOutcome {
    pub opponent_joined: Option<String>,
    pub position_changed: bool,
}

impl SessionState {
    pub fn new_local(display_name: String, difficulty: Difficulty) -> Self {
        Self {
            display_name,
            game: Game::new(),
            intent: MoveIntent::default(),
            assigned: Some(PlayerSide::White),
            opponent_name: None,
            mode: ModeState::Local { difficulty },
            concluded: false,
            bot_pending: false,
        }
    }

    pub fn new_shared(
        display_name: String,
        game: Game,
        assigned: PlayerSide,
        opponent_name: Option<String>,
        sync: Synchronizer,
    ) -> Self {
        let concluded = game.is_over();
        Self {
            display_name,
            game,
            intent: MoveIntent::default(),
            assigned: Some(assigned),
            opponent_name,
            mode: ModeState::Shared { sync },
            concluded,
            bot_pending: false,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.mode, ModeState::Shared { .. })
    }

    /// Label for the session's tracing span.
    pub fn session_label(&self) -> String {
        match &self.mode {
            ModeState::Local { .. } => "local".to_string(),
            ModeState::Shared { sync } => sync.room_id().to_string(),
        }
    }

    fn turn_facts(&self) -> TurnFacts {
        TurnFacts {
            assigned: self.assigned,
            side_to_move: self.game.side_to_move(),
            mode: match self.mode {
                ModeState::Local { .. } => TurnMode::Local {
                    bot_pending: self.bot_pending,
                },
                ModeState::Shared { .. } => TurnMode::Shared {
                    opponent_present: self.opponent_name.is_some(),
                },
            },
            concluded: self.concluded,
        }
    }

    /// Whether the local user is permitted to move right now. Consulted
    /// before any player-originated move attempt is accepted.
    pub fn may_move(&self) -> bool {
        arbiter::may_move(&self.turn_facts())
    }

    fn waiting_for_opponent(&self) -> bool {
        self.is_shared() && self.opponent_name.is_none()
    }

    fn opponent_label(&self) -> Option<String> {
        match &self.mode {
            ModeState::Local { difficulty } => Some(format!("Bot ({difficulty})")),
            ModeState::Shared { .. } => self.opponent_name.clone(),
        }
    }

    /// Build a full snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            fen: self.game.to_fen(),
            side_to_move: self.game.side_to_move(),
            assigned: self.assigned,
            display_name: self.display_name.clone(),
            opponent_name: self.opponent_label(),
            waiting_for_opponent: self.waiting_for_opponent(),
            bot_thinking: self.bot_pending,
            concluded: self.concluded,
            status: self.game.status(),
            highlighted: self.intent.highlighted(),
            interaction_enabled: self.may_move(),
            board_orientation: self.assigned.unwrap_or(PlayerSide::White),
        }
    }

    /// Two-phase select/target protocol for square clicks.
    pub fn handle_square_intent(&mut self, square: Square) -> IntentOutcome {
        if !self.may_move() {
            return IntentOutcome::Ignored;
        }

        let Some(origin) = self.intent.origin() else {
            return self.arm_or_clear(square);
        };

        let Some(mv) = self.candidate_for_click(origin, square) else {
            // Not a recorded destination: pivot to the new square or clear.
            return self.arm_or_clear(square);
        };

        match self.game.make_move(mv) {
            Ok(()) => {
                self.intent.clear();
                self.concluded = self.game.is_over();
                IntentOutcome::Moved
            }
            // Candidate set rejected by the engine after all; re-select.
            Err(_) => self.arm_or_clear(square),
        }
    }

    /// Drag-and-drop path: one shot, no re-arming on failure.
    pub fn handle_direct_move(&mut self, from: Square, to: Square) -> bool {
        if !self.may_move() {
            return false;
        }
        let Some(mv) = self.game.resolve_move(from, to) else {
            return false;
        };
        if self.game.make_move(mv).is_err() {
            return false;
        }
        self.intent.clear();
        self.concluded = self.game.is_over();
        true
    }

    fn candidate_for_click(&self, origin: Square, target: Square) -> Option<Move> {
        if let Some(mv) = self.intent.candidate_for(target) {
            return Some(mv);
        }
        // A click on the standard castling target lands beside the rook
        // square the candidate list actually holds; resolve it against the
        // same set.
        self.game
            .resolve_move(origin, target)
            .filter(|mv| self.intent.contains(mv))
    }

    fn arm_or_clear(&mut self, square: Square) -> IntentOutcome {
        let candidates = self.game.legal_moves_from(square);
        if candidates.is_empty() {
            let was_armed = self.intent.is_armed();
            self.intent.clear();
            if was_armed {
                IntentOutcome::Cleared
            } else {
                IntentOutcome::Ignored
            }
        } else {
            self.intent.arm(square, candidates);
            IntentOutcome::Armed
        }
    }

    /// Apply the scripted opponent's reply. The selector's move is trusted;
    /// a rejection here is a contract violation, not a user-facing error.
    pub fn bot_reply(&mut self) -> Result<(), SessionError> {
        let ModeState::Local { difficulty } = &self.mode else {
            return Err(SessionError::Internal(
                "scripted reply requested in shared mode".into(),
            ));
        };
        let mv = bot::select_move(&self.game, *difficulty)
            .map_err(|e| SessionError::Internal(e.to_string()))?;
        self.game.make_move(mv).map_err(|e| {
            SessionError::Internal(format!("selector produced illegal move: {e}"))
        })?;
        self.concluded = self.game.is_over();
        Ok(())
    }

    /// Push the local position to the shared record. No-op in local mode.
    pub fn push_position(&self) -> Result<(), SyncError> {
        match &self.mode {
            ModeState::Shared { sync } => sync.push(&self.game.to_fen(), self.game.side_to_move()),
            ModeState::Local { .. } => Ok(()),
        }
    }

    pub fn poll_record(&self) -> Result<Option<RoomRecord>, SyncError> {
        match &self.mode {
            ModeState::Shared { sync } => sync.poll(),
            ModeState::Local { .. } => Ok(None),
        }
    }

    /// Fold a polled record into local state. A record matching the local
    /// position (including one we pushed ourselves) is a no-op.
    pub fn reconcile(&mut self, record: &RoomRecord) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        if self.assigned == Some(PlayerSide::White) && self.opponent_name.is_none() {
            if let Some(name) = &record.player2 {
                self.opponent_name = Some(name.clone());
                outcome.opponent_joined = Some(name.clone());
            }
        }

        if record.fen != self.game.to_fen() {
            match self.game.load_fen(&record.fen) {
                Ok(()) => {
                    self.intent.clear();
                    self.concluded = self.game.is_over();
                    outcome.position_changed = true;
                }
                Err(e) => {
                    // Skip this cycle; the next poll retries.
                    tracing::warn!("Ignoring unreadable shared position: {e}");
                }
            }
        }

        outcome
    }
}
