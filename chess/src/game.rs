use cozy_chess::{Board, File, GameStatus, Move, Piece, Rank, Square};

use crate::types::PlayerSide;

/// Authoritative board position plus side-to-move, wrapping cozy-chess.
///
/// The session layer treats the FEN form as opaque except for equality;
/// everything that needs to understand the position goes through here.
#[derive(Debug, Clone)]
pub struct Game {
    position: Board,
}

impl Game {
    /// Start a game from the standard starting position.
    pub fn new() -> Self {
        Self {
            position: Board::default(),
        }
    }

    /// Start a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self {
            position: crate::fen::parse_fen(fen)?,
        })
    }

    /// Replace the position wholesale, bypassing the move-application path.
    ///
    /// Used when reconciling against a position that was already validated
    /// by the remote participant's own session.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), GameError> {
        self.position = crate::fen::parse_fen(fen)?;
        Ok(())
    }

    pub fn position(&self) -> &Board {
        &self.position
    }

    pub fn to_fen(&self) -> String {
        crate::fen::format_fen(&self.position)
    }

    pub fn side_to_move(&self) -> PlayerSide {
        self.position.side_to_move().into()
    }

    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    /// Terminal predicate: no further play is possible from this position.
    pub fn is_over(&self) -> bool {
        self.position.status() != GameStatus::Ongoing
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.position.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    /// Legal moves starting from one square. Empty when the square is not
    /// occupied by a piece of the side to move.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        self.position.generate_moves(|mvs| {
            moves.extend(mvs.into_iter().filter(|mv| mv.from == from));
            false
        });
        moves
    }

    /// Make a move on the board.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        if !self.legal_moves().contains(&mv) {
            return Err(GameError::IllegalMove);
        }
        let mut next = self.position.clone();
        next.play_unchecked(mv);
        self.position = next;
        Ok(())
    }

    /// Resolve an (origin, target) pair against the legal move list.
    ///
    /// Promotions always resolve to the queen. Standard castling targets
    /// (king two files toward the rook) are mapped onto cozy-chess's
    /// king-takes-rook encoding.
    pub fn resolve_move(&self, from: Square, to: Square) -> Option<Move> {
        let legal = self.legal_moves();
        let to = self.normalize_castling_target(from, to, &legal);

        let mut fallback = None;
        for mv in legal {
            if mv.from != from || mv.to != to {
                continue;
            }
            match mv.promotion {
                None | Some(Piece::Queen) => return Some(mv),
                Some(_) => fallback = Some(mv),
            }
        }
        fallback
    }

    /// cozy-chess encodes castling as the king capturing its own rook.
    /// A click or drop on g1/c1 (g8/c8) with the king on e1 (e8) means a
    /// castle in standard notation; map it to the rook square when that
    /// yields a legal move, otherwise leave the target untouched.
    fn normalize_castling_target(&self, from: Square, to: Square, legal: &[Move]) -> Square {
        if from.file() != File::E || !matches!(from.rank(), Rank::First | Rank::Eighth) {
            return to;
        }
        if self.position.piece_on(from) != Some(Piece::King) {
            return to;
        }
        let rook_file = match to.file() {
            File::G => File::H,
            File::C => File::A,
            _ => return to,
        };
        let rook_target = Square::new(rook_file, from.rank());
        let converted = Move {
            from,
            to: rook_target,
            promotion: None,
        };
        if legal.contains(&converted) {
            rook_target
        } else {
            to
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move")]
    IllegalMove,
    #[error("FEN parse error: {0}")]
    Fen(#[from] crate::fen::FenError),
}
