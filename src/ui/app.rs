use crate::config::AppConfig;
use crate::error::GridError;
use crate::game::{Coord, Direction, GridEngine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::info;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

pub struct App {
    config: AppConfig,
    engine: GridEngine,
    show_open_cells: bool,
    last_spawn: Option<Coord>,
    game_over: bool,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, GridError> {
        let engine = new_game(&config)?;
        let game_over = engine.is_lost();
        Ok(App {
            show_open_cells: config.ui.show_open_cells,
            config,
            engine,
            last_spawn: None,
            game_over,
            should_quit: false,
            message: None,
        })
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.config.ui.tick_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        let direction = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('o') => {
                self.show_open_cells = !self.show_open_cells;
                return;
            }
            KeyCode::Char('r') => {
                self.restart();
                return;
            }
            KeyCode::Left | KeyCode::Char('a') => Direction::Left,
            KeyCode::Right | KeyCode::Char('d') => Direction::Right,
            KeyCode::Up | KeyCode::Char('w') => Direction::Up,
            KeyCode::Down | KeyCode::Char('s') => Direction::Down,
            _ => return,
        };

        self.play(direction);
    }

    /// Apply a move, and spawn a tile if anything moved.
    fn play(&mut self, direction: Direction) {
        if self.game_over {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        let before = self.engine.board().clone();
        self.engine.apply_move(direction);
        if *self.engine.board() == before {
            self.message = Some(format!("Nothing moves {}.", direction.name()));
            return;
        }

        self.engine.refresh_open_cells();
        self.last_spawn = self.engine.spawn_random_tile();
        self.engine.refresh_open_cells();

        if self.engine.is_lost() {
            self.game_over = true;
            info!("game over, score {}", self.engine.score());
            self.message = Some(format!(
                "Game over! Final score {}. Press 'r' to restart.",
                self.engine.score()
            ));
        }
    }

    fn restart(&mut self) {
        match new_game(&self.config) {
            Ok(engine) => {
                self.game_over = engine.is_lost();
                self.engine = engine;
                self.last_spawn = None;
                self.message = Some("New game started!".to_string());
            }
            Err(e) => self.message = Some(format!("Cannot restart: {e}")),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.engine,
            self.show_open_cells,
            self.last_spawn,
            &self.message,
            self.game_over,
        );
    }
}

/// Fresh engine with the configured size, seed and opening tiles.
fn new_game(config: &AppConfig) -> Result<GridEngine, GridError> {
    let game = &config.game;
    let mut engine = GridEngine::with_dimensions(game.rows, game.cols, game.seed)?;
    engine.start(game.initial_tiles);
    info!(
        "new {}x{} game, {} starting tiles",
        game.rows, game.cols, game.initial_tiles
    );
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn seeded_app(seed: u64) -> App {
        let mut config = AppConfig::default();
        config.game.seed = Some(seed);
        App::new(config).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn test_new_app_starts_with_two_tiles() {
        let app = seeded_app(1);
        assert_eq!(app.engine().open_cells().len(), 14);
        assert!(!app.is_game_over());
    }

    #[test]
    fn test_move_spawns_when_board_changes() {
        let mut app = seeded_app(5);
        let mut moved = false;
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down] {
            let before = app.engine().board().clone();
            let tiles_before = 16 - app.engine().open_cells().len();
            press(&mut app, code);
            if *app.engine().board() != before {
                moved = true;
                let tiles_after = 16 - app.engine().open_cells().len();
                // a merge removes one tile, the spawn adds one
                assert!(tiles_after <= tiles_before + 1);
                assert!(app.last_spawn.is_some());
                break;
            }
        }
        assert!(moved);
    }

    #[test]
    fn test_blocked_move_does_not_spawn() {
        let mut app = seeded_app(9);
        app.engine = GridEngine::from_matrix(&[[2u32, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        app.engine.refresh_open_cells();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.engine().score(), 2);
        assert_eq!(app.message.as_deref(), Some("Nothing moves Left."));
    }

    #[test]
    fn test_filling_last_cell_ends_game() {
        let mut app = seeded_app(3);
        app.engine = GridEngine::from_matrix(&[
            [2u32, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [0, 8, 16, 32],
        ])
        .unwrap();
        press(&mut app, KeyCode::Left);
        assert!(app.is_game_over());
        assert!(app.engine().is_lost());

        // further moves are refused
        let before = app.engine().board().clone();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.engine().board(), &before);
    }

    #[test]
    fn test_toggle_open_cells_and_quit() {
        let mut app = seeded_app(2);
        assert!(!app.show_open_cells);
        press(&mut app, KeyCode::Char('o'));
        assert!(app.show_open_cells);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_restart_replays_seed() {
        let mut app = seeded_app(11);
        let opening = app.engine().board().clone();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.engine().board(), &opening);
        assert_eq!(app.message.as_deref(), Some("New game started!"));
    }

    #[test]
    fn test_render_shows_score() {
        let mut app = seeded_app(4);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        app.should_quit = true;
        app.run(&mut terminal).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(&format!("Score: {}", app.engine().score())));
    }
}
