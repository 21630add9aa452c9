//! Terminal UI: a ratatui front-end that drives the grid engine from the
//! keyboard.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
