//! Lightweight board representation for rendering from FEN.

/// An 8x8 grid of FEN piece characters, for display only.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    squares: [[Option<char>; 8]; 8],
}

impl DisplayBoard {
    /// Parse the placement field of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, DisplayError> {
        let placement = fen.split_whitespace().next().ok_or(DisplayError::InvalidFen)?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(DisplayError::InvalidFen);
        }

        let mut squares = [[None; 8]; 8];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if file > 7 {
                    return Err(DisplayError::InvalidFen);
                }
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else if "pnbrqkPNBRQK".contains(c) {
                    squares[rank][file] = Some(c);
                    file += 1;
                } else {
                    return Err(DisplayError::InvalidPiece(c));
                }
            }
        }

        Ok(DisplayBoard { squares })
    }

    /// Piece character at a square. File and rank are zero-based from
    /// white's corner (a1 = 0,0); uppercase is white.
    pub fn piece_at(&self, file: u8, rank: u8) -> Option<char> {
        if file > 7 || rank > 7 {
            return None;
        }
        self.squares[rank as usize][file as usize]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Invalid FEN string")]
    InvalidFen,
    #[error("Invalid piece character: {0}")]
    InvalidPiece(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let board =
            DisplayBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(board.piece_at(0, 0), Some('R'));
        assert_eq!(board.piece_at(4, 0), Some('K'));
        assert_eq!(board.piece_at(3, 7), Some('q'));
        assert_eq!(board.piece_at(4, 4), None);
    }

    #[test]
    fn test_empty_board() {
        let board = DisplayBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        for rank in 0..8 {
            for file in 0..8 {
                assert_eq!(board.piece_at(file, rank), None);
            }
        }
    }

    #[test]
    fn test_bad_piece_char_rejected() {
        assert!(matches!(
            DisplayBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNZ w KQkq - 0 1"),
            Err(DisplayError::InvalidPiece('Z'))
        ));
    }
}
