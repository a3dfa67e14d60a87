//! Transient "selected piece, awaiting destination" state.

use cozy_chess::{Move, Piece, Square};

/// At most one origin is armed at a time; the candidate list holds the
/// legal moves recorded when the origin was selected.
#[derive(Debug, Clone, Default)]
pub struct MoveIntent {
    origin: Option<Square>,
    candidates: Vec<Move>,
}

impl MoveIntent {
    /// Arm the intent on an origin with its legal moves.
    pub fn arm(&mut self, origin: Square, candidates: Vec<Move>) {
        debug_assert!(candidates.iter().all(|mv| mv.from == origin));
        self.origin = Some(origin);
        self.candidates = candidates;
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.candidates.clear();
    }

    pub fn origin(&self) -> Option<Square> {
        self.origin
    }

    pub fn is_armed(&self) -> bool {
        self.origin.is_some()
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.candidates.contains(mv)
    }

    /// Candidate move to the given target, promotions resolved to the queen.
    pub fn candidate_for(&self, target: Square) -> Option<Move> {
        let mut fallback = None;
        for mv in &self.candidates {
            if mv.to != target {
                continue;
            }
            match mv.promotion {
                None | Some(Piece::Queen) => return Some(*mv),
                Some(_) => fallback = Some(*mv),
            }
        }
        fallback
    }

    /// Squares to highlight: the armed origin plus every candidate target.
    pub fn highlighted(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = self.origin.into_iter().collect();
        for mv in &self.candidates {
            if !squares.contains(&mv.to) {
                squares.push(mv.to);
            }
        }
        squares
    }
}
