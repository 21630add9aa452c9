//! # Term 2048
//!
//! The tile-merging puzzle 2048 on a fixed-size grid, played in the
//! terminal. The engine reduces every move to a single "shift left, merge,
//! shift left" pass plus clockwise rotations.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, directions, grid engine
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
