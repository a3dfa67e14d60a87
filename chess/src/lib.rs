pub mod display;
pub mod fen;
pub mod game;
pub mod types;

pub use display::{DisplayBoard, DisplayError};
pub use fen::{format_fen, parse_fen, FenError};
pub use game::{Game, GameError};
pub use types::{format_square, parse_square, PlayerSide};
