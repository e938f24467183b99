//! Core Connect Four game logic: packed-bit board representation, player
//! types, and the turn-taking placement engine.

mod bitboard;
mod engine;
mod player;

pub use bitboard::{Bitboard, Direction};
pub use engine::{GameEngine, GameOutcome, MoveError, COLS, MAX_MOVES, ROWS};
pub use player::Player;
