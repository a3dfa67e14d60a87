//! Chessroom CLI - play against the scripted opponent or share a room.
//!
//! Runs one game session in the terminal. With no room argument the session
//! is local against the scripted opponent; `--room` (or `--new-room`) opens
//! a shared room backed by a file store, which a second invocation on the
//! same machine can join.
//!
//! Input is line-based: a square ("e2") arms or completes a click intent,
//! a move ("e2e4") applies directly, "quit" ends the session.

mod config;
mod view;

use std::path::PathBuf;

use clap::Parser;
use cozy_chess::Square;
use roomstore::FileStore;
use session::{SessionEvent, SessionHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "chessroom", about = "Two-player chess rooms over a shared store")]
struct Cli {
    /// Display name shown to the opponent.
    #[arg(short, long, default_value = "player")]
    name: String,

    /// Join (or create) the shared room with this identifier.
    #[arg(short, long, conflicts_with = "new_room")]
    room: Option<String>,

    /// Create a shared room with a fresh identifier and print it.
    #[arg(long)]
    new_room: bool,

    /// Scripted opponent difficulty for local sessions.
    #[arg(short, long, default_value = "easy")]
    difficulty: bot::Difficulty,

    /// Directory for shared room records. Defaults to CHESSROOM_DATA_DIR,
    /// then ~/.config/chessroom/rooms, then ./data.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let room_id = if cli.new_room {
        Some(uuid::Uuid::new_v4().to_string())
    } else {
        cli.room.clone()
    };

    let (handle, events) = match room_id {
        Some(room_id) => {
            let dir = cli.data_dir.clone().unwrap_or_else(config::get_rooms_dir);
            tracing::info!(room = %room_id, dir = %dir.display(), "Opening shared room");
            println!("Room: {room_id}");
            session::spawn_shared(&cli.name, &room_id, Box::new(FileStore::new(dir)))?
        }
        None => {
            tracing::info!(difficulty = %cli.difficulty, "Starting local session");
            session::spawn_local(&cli.name, cli.difficulty)
        }
    };

    run(handle, events).await
}

enum Input {
    Square(Square),
    Move(Square, Square),
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line {
        "quit" | "exit" => return Some(Input::Quit),
        _ => {}
    }
    match line.len() {
        2 => chess::parse_square(line).map(Input::Square),
        4 => {
            let from = chess::parse_square(&line[..2])?;
            let to = chess::parse_square(&line[2..])?;
            Some(Input::Move(from, to))
        }
        _ => None,
    }
}

async fn run(
    handle: SessionHandle,
    mut events: broadcast::Receiver<SessionEvent>,
) -> anyhow::Result<()> {
    let snap = handle.get_snapshot().await?;
    print!("{}", view::render(&snap));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match parse_input(input) {
                    Some(Input::Quit) => break,
                    Some(Input::Square(square)) => {
                        let snap = handle.square_intent(square).await?;
                        print!("{}", view::render(&snap));
                    }
                    Some(Input::Move(from, to)) => {
                        let (applied, snap) = handle.direct_move(from, to).await?;
                        if !applied {
                            println!("Move not accepted");
                        }
                        print!("{}", view::render(&snap));
                    }
                    None => {
                        println!("Enter a square (e2), a move (e2e4), or quit");
                    }
                }
            }

            event = events.recv() => {
                match event {
                    Ok(SessionEvent::StateChanged(snap)) => {
                        print!("{}", view::render(&snap));
                    }
                    Ok(SessionEvent::OpponentJoined { name }) => {
                        println!("{name} joined the room");
                    }
                    Ok(SessionEvent::Concluded(snap)) => {
                        print!("{}", view::render(&snap));
                        break;
                    }
                    Ok(SessionEvent::Error(e)) => {
                        println!("Session error: {e}");
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("Dropped {skipped} events, refreshing");
                        let snap = handle.get_snapshot().await?;
                        print!("{}", view::render(&snap));
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
