//! Project-owned side type and square string helpers.
//! cozy-chess types stay an implementation detail of the legality layer.

use cozy_chess::{Color, Square};

/// Side of the board a participant plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSide {
    White,
    Black,
}

impl PlayerSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "white" => Some(Self::White),
            "black" => Some(Self::Black),
            _ => None,
        }
    }
}

impl From<Color> for PlayerSide {
    fn from(c: Color) -> Self {
        match c {
            Color::White => Self::White,
            Color::Black => Self::Black,
        }
    }
}

impl From<PlayerSide> for Color {
    fn from(s: PlayerSide) -> Self {
        match s {
            PlayerSide::White => Self::White,
            PlayerSide::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a square name like "e4". Returns None for anything else.
pub fn parse_square(s: &str) -> Option<Square> {
    s.parse().ok()
}

/// Format a square as its lowercase name, e.g. "e4".
pub fn format_square(sq: Square) -> String {
    sq.to_string()
}
