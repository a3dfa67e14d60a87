//! Two sessions sharing one room through an in-memory store.

use std::time::Duration;

use chess::{parse_square, PlayerSide};
use cozy_chess::Square;
use roomstore::{MemoryStore, RoomRecord, SharedStore};
use session::{SessionError, SessionEvent, SessionHandle};
use tokio::sync::broadcast;

fn sq(name: &str) -> Square {
    parse_square(name).unwrap()
}

async fn next_event(rx: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
    tokio::time::timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

fn spawn_pair(
    store: &MemoryStore,
    room: &str,
) -> (
    (SessionHandle, broadcast::Receiver<SessionEvent>),
    (SessionHandle, broadcast::Receiver<SessionEvent>),
) {
    let alice = session::spawn_shared("alice", room, Box::new(store.clone())).unwrap();
    let bob = session::spawn_shared("bob", room, Box::new(store.clone())).unwrap();
    (alice, bob)
}

#[tokio::test(start_paused = true)]
async fn test_creator_waits_until_second_seat_fills() {
    let store = MemoryStore::new();
    let (alice, mut alice_events) =
        session::spawn_shared("alice", "r1", Box::new(store.clone())).unwrap();

    let snap = alice.get_snapshot().await.unwrap();
    assert_eq!(snap.assigned, Some(PlayerSide::White));
    assert!(snap.waiting_for_opponent);
    assert!(!snap.interaction_enabled, "no moves before the opponent joins");

    let (bob, _bob_events) = session::spawn_shared("bob", "r1", Box::new(store.clone())).unwrap();
    let bob_snap = bob.get_snapshot().await.unwrap();
    assert_eq!(bob_snap.assigned, Some(PlayerSide::Black));
    assert_eq!(bob_snap.opponent_name.as_deref(), Some("alice"));

    // Alice learns of the join on her next poll.
    let event = next_event(&mut alice_events).await;
    let SessionEvent::OpponentJoined { name } = event else {
        panic!("expected OpponentJoined, got {event:?}");
    };
    assert_eq!(name, "bob");

    let snap = alice.get_snapshot().await.unwrap();
    assert!(!snap.waiting_for_opponent);
    assert!(snap.interaction_enabled, "white to move once both seats fill");
}

#[tokio::test(start_paused = true)]
async fn test_third_participant_is_rejected() {
    let store = MemoryStore::new();
    let _pair = spawn_pair(&store, "r2");

    let result = session::spawn_shared("carol", "r2", Box::new(store.clone()));
    assert!(matches!(result, Err(SessionError::RoomFull(_))));
}

#[tokio::test(start_paused = true)]
async fn test_move_propagates_through_the_store() {
    let store = MemoryStore::new();
    let ((alice, mut alice_events), (bob, mut bob_events)) = spawn_pair(&store, "r3");

    // Alice must see the join before she may move.
    loop {
        if matches!(next_event(&mut alice_events).await, SessionEvent::OpponentJoined { .. }) {
            break;
        }
    }

    let (applied, snap) = alice.direct_move(sq("e2"), sq("e4")).await.unwrap();
    assert!(applied);
    assert_eq!(snap.side_to_move, PlayerSide::Black);
    assert!(!snap.interaction_enabled, "black to move, alice waits");

    // Bob's poll picks the position up.
    let fen = loop {
        if let SessionEvent::StateChanged(s) = next_event(&mut bob_events).await {
            break s.fen;
        }
    };
    assert_eq!(fen, snap.fen);

    let bob_snap = bob.get_snapshot().await.unwrap();
    assert!(bob_snap.interaction_enabled, "turn passed to bob");
    assert_eq!(bob_snap.board_orientation, PlayerSide::Black);
}

#[tokio::test(start_paused = true)]
async fn test_full_exchange_converges() {
    let store = MemoryStore::new();
    let ((alice, mut alice_events), (bob, mut bob_events)) = spawn_pair(&store, "r4");

    loop {
        if matches!(next_event(&mut alice_events).await, SessionEvent::OpponentJoined { .. }) {
            break;
        }
    }

    alice.direct_move(sq("e2"), sq("e4")).await.unwrap();
    loop {
        if matches!(next_event(&mut bob_events).await, SessionEvent::StateChanged(_)) {
            break;
        }
    }

    let (applied, _) = bob.direct_move(sq("e7"), sq("e5")).await.unwrap();
    assert!(applied);
    loop {
        if matches!(next_event(&mut alice_events).await, SessionEvent::StateChanged(_)) {
            break;
        }
    }

    let a = alice.get_snapshot().await.unwrap();
    let b = bob.get_snapshot().await.unwrap();
    assert_eq!(a.fen, b.fen, "both sessions converge on the pushed position");
    assert_eq!(a.side_to_move, PlayerSide::White);
    assert!(a.interaction_enabled);
    assert!(!b.interaction_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_joiner_inherits_position_in_progress() {
    // Seat 1 pushed moves before anyone joined; the record is mid-game.
    let mid_game = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1";
    let store = MemoryStore::new();
    let record = RoomRecord {
        fen: mid_game.to_string(),
        player1: "alice".to_string(),
        player2: None,
        turn: "black".to_string(),
    };
    store
        .set(&RoomRecord::key("r5"), &record.to_json().unwrap())
        .unwrap();

    let (bob, _bob_events) = session::spawn_shared("bob", "r5", Box::new(store.clone())).unwrap();
    let snap = bob.get_snapshot().await.unwrap();
    assert_eq!(snap.assigned, Some(PlayerSide::Black));
    assert_eq!(snap.fen, mid_game);
    assert_eq!(snap.opponent_name.as_deref(), Some("alice"));
    assert!(snap.interaction_enabled, "inherited position has black to move");
}

#[tokio::test(start_paused = true)]
async fn test_own_push_is_not_reapplied() {
    let store = MemoryStore::new();
    let ((alice, mut alice_events), _bob) = spawn_pair(&store, "r6");

    loop {
        if matches!(next_event(&mut alice_events).await, SessionEvent::OpponentJoined { .. }) {
            break;
        }
    }
    let (_, snap) = alice.direct_move(sq("g1"), sq("f3")).await.unwrap();
    let event = next_event(&mut alice_events).await;
    assert!(matches!(event, SessionEvent::StateChanged(_)));

    // Several poll intervals pass; alice observes her own record and must
    // not emit further state changes for it.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let mut extra = 0;
    while let Ok(event) = alice_events.try_recv() {
        if matches!(event, SessionEvent::StateChanged(_)) {
            extra += 1;
        }
    }
    assert_eq!(extra, 0, "own push must reconcile as a no-op");

    let after = alice.get_snapshot().await.unwrap();
    assert_eq!(after.fen, snap.fen);
}
