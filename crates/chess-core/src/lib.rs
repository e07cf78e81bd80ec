pub mod board;
pub mod game_data;
pub mod pgn;

pub use board::Board;
pub use game_data::Game;
pub use pgn::{parse_pgn, PgnError};
