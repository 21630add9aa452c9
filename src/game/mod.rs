//! Core 2048 logic: the tile matrix and its shift/merge/rotate primitives,
//! move directions, and the engine that owns a board, its open cells and a
//! random source.

mod board;
mod direction;
mod engine;

pub use board::{merge_row, shift_row, Board, Coord, COLS, ROWS};
pub use direction::Direction;
pub use engine::{GridEngine, FOUR_PROBABILITY};
