use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use term_2048::config::AppConfig;
use term_2048::game::GridEngine;

/// Play 2048 line by line on stdin/stdout.
#[derive(Parser)]
#[command(name = "play", about = "Play 2048 with typed moves (U, D, L, R)")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Fixed RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Print open cells as `**` instead of `-`
    #[arg(long)]
    open_cells: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if let Some(rows) = cli.rows {
        config.game.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.game.cols = cols;
    }
    config.validate().context("invalid command-line overrides")?;

    let game = &config.game;
    let mut engine = GridEngine::with_dimensions(game.rows, game.cols, game.seed)
        .context("creating game")?;
    engine.start(game.initial_tiles);
    info!("new {}x{} game", game.rows, game.cols);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let score = play(&mut engine, stdin.lock(), &mut stdout.lock(), cli.open_cells)?;
    info!("finished with score {score}");
    Ok(())
}

/// Run the move loop until the game is lost, input ends, or `Q` is typed.
/// Returns the final score.
fn play<R, W>(engine: &mut GridEngine, input: R, out: &mut W, open_cells: bool) -> io::Result<u64>
where
    R: BufRead,
    W: Write,
{
    show(engine, out, open_cells)?;

    for line in input.lines() {
        let line = line?;
        let Some(letter) = line.trim().chars().next().map(|c| c.to_ascii_uppercase()) else {
            continue;
        };
        if letter == 'Q' {
            break;
        }

        let before = engine.board().clone();
        engine.apply_move_letter(letter);
        if *engine.board() == before {
            writeln!(out, "No tiles moved. Moves: U, D, L, R (Q quits)")?;
            continue;
        }

        engine.refresh_open_cells();
        engine.spawn_random_tile();
        engine.refresh_open_cells();
        show(engine, out, open_cells)?;

        if engine.is_lost() {
            writeln!(out, "Game over!")?;
            break;
        }
    }

    writeln!(out, "Score: {}", engine.score())?;
    Ok(engine.score())
}

fn show<W: Write>(engine: &GridEngine, out: &mut W, open_cells: bool) -> io::Result<()> {
    if open_cells {
        engine.write_open_cells(out)?;
    } else {
        engine.write_grid(out)?;
    }
    writeln!(out, "Score: {}", engine.score())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(engine: &mut GridEngine, input: &str, open_cells: bool) -> String {
        let mut out = Vec::new();
        play(engine, input.as_bytes(), &mut out, open_cells).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_quit_prints_board_and_score() {
        let mut engine = GridEngine::from_matrix(&[[2u32, 0], [0, 0]]).unwrap();
        let out = run(&mut engine, "q\n", false);
        assert_eq!(out, "2    -    \n-    -    \nScore: 2\nScore: 2\n");
    }

    #[test]
    fn test_unknown_letter_is_ignored() {
        let mut engine = GridEngine::from_matrix(&[[0u32, 2], [0, 0]]).unwrap();
        let out = run(&mut engine, "x\n", false);
        assert!(out.contains("No tiles moved"));
        assert_eq!(engine.to_matrix(), vec![vec![0, 2], vec![0, 0]]);
    }

    #[test]
    fn test_move_spawns_and_loses_when_full() {
        let mut engine = GridEngine::from_matrix(&[[0u32, 2], [4, 8]]).unwrap();
        let out = run(&mut engine, "left\nright\n", false);
        assert!(out.contains("Game over!"));
        assert_eq!(engine.board().row(0)[0], 2);
        assert!(engine.is_lost());
    }

    #[test]
    fn test_open_cells_are_marked() {
        let mut engine = GridEngine::from_matrix(&[[0u32, 2], [0, 0]]).unwrap();
        engine.refresh_open_cells();
        let out = run(&mut engine, "", true);
        assert!(out.starts_with("**   2    \n**   **   \n"));
    }
}
