//! Scripted-opponent move selection.
//!
//! Given a position and a difficulty level, picks one legal move. The
//! session layer trusts the returned move and applies it without a second
//! legality check.

use chess::Game;
use cozy_chess::{Move, Piece};
use rand::seq::SliceRandom;
use rand::Rng;

/// Difficulty tiers for the scripted opponent.
///
/// Hard is a labeled tier that currently shares Easy's near-random policy;
/// only Medium has a distinct (capture-preferring) behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectError {
    /// The position is terminal. Callers must check before selecting.
    #[error("no legal moves available")]
    NoLegalMoves,
}

/// Select a move for the side to move.
pub fn select_move(game: &Game, difficulty: Difficulty) -> Result<Move, SelectError> {
    select_move_with(game, difficulty, &mut rand::thread_rng())
}

/// Select a move using an explicit RNG, for deterministic callers.
pub fn select_move_with(
    game: &Game,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Result<Move, SelectError> {
    let moves = game.legal_moves();
    if moves.is_empty() {
        return Err(SelectError::NoLegalMoves);
    }

    let mv = match difficulty {
        Difficulty::Medium => moves
            .iter()
            .find(|mv| is_capture(game, mv))
            .copied()
            .unwrap_or(moves[0]),
        Difficulty::Easy | Difficulty::Hard => *moves
            .choose(rng)
            .ok_or(SelectError::NoLegalMoves)?,
    };

    Ok(mv)
}

/// Whether a move takes an opponent piece.
///
/// Occupancy of the target square alone misreads both special cases:
/// en passant lands on an empty square, and cozy-chess encodes castling
/// as the king moving onto its own rook.
fn is_capture(game: &Game, mv: &Move) -> bool {
    let board = game.position();
    if let Some(color) = board.color_on(mv.to) {
        return color != board.side_to_move();
    }
    // A pawn leaving its file onto an empty square is an en passant take.
    board.piece_on(mv.from) == Some(Piece::Pawn) && mv.from.file() != mv.to.file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::parse_square;
    use cozy_chess::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_easy_returns_legal_move() {
        let game = Game::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mv = select_move_with(&game, Difficulty::Easy, &mut rng).unwrap();
        assert!(game.legal_moves().contains(&mv));
    }

    #[test]
    fn test_easy_is_deterministic_per_seed() {
        let game = Game::new();
        let a = select_move_with(&game, Difficulty::Easy, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = select_move_with(&game, Difficulty::Easy, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_medium_prefers_capture() {
        // Black to move, black pawn on d5 can take the e4 pawn.
        let game =
            Game::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2")
                .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mv = select_move_with(&game, Difficulty::Medium, &mut rng).unwrap();
        assert!(game.position().piece_on(mv.to).is_some(), "expected a capture, got {mv}");
    }

    #[test]
    fn test_medium_takes_en_passant_when_it_is_the_only_capture() {
        // White just played d2d4; exd3 en passant is black's only capture.
        let game = Game::from_fen(
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 3",
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mv = select_move_with(&game, Difficulty::Medium, &mut rng).unwrap();
        assert_eq!(mv.from, parse_square("e4").unwrap());
        assert_eq!(mv.to, parse_square("d3").unwrap());
    }

    #[test]
    fn test_medium_does_not_mistake_castling_for_a_capture() {
        // White may castle kingside and has no capture anywhere. The castle
        // lands the king on its own rook's square; a capture-first policy
        // must never read that as a take.
        let game = Game::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/5NP1/PPPPPPBP/RNBQK2R w KQkq - 0 1",
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mv = select_move_with(&game, Difficulty::Medium, &mut rng).unwrap();
        assert_ne!(game.position().color_on(mv.to), Some(Color::White));
    }

    #[test]
    fn test_medium_without_captures_returns_legal_move() {
        let game = Game::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mv = select_move_with(&game, Difficulty::Medium, &mut rng).unwrap();
        assert!(game.legal_moves().contains(&mv));
    }

    #[test]
    fn test_terminal_position_errors() {
        // Fool's mate final position, black has delivered mate.
        let game = Game::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert!(game.is_over());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            select_move_with(&game, Difficulty::Hard, &mut rng),
            Err(SelectError::NoLegalMoves)
        ));
    }

    #[test]
    fn test_difficulty_parse_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
