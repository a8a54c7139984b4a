pub mod attacks;
pub mod board;
pub mod castling;
pub mod error;
pub mod fen;
pub mod game_state;
pub mod move_gen;
pub mod mutate;
pub mod types;

pub use attacks::*;
pub use board::*;
pub use castling::*;
pub use error::*;
pub use fen::positions;
pub use game_state::*;
pub use move_gen::*;
pub use mutate::*;
pub use types::*;
