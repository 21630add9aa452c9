use std::io::{self, Write};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::{Board, Coord};
use super::direction::Direction;
use crate::error::GridError;

/// Chance that a spawned tile is a 4 instead of a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Owns a board, the set of its open cells and the random source used to
/// spawn tiles.
///
/// The open-cell set is not kept up to date by moves. Call
/// [`GridEngine::refresh_open_cells`] after mutating the board and before
/// reading [`GridEngine::open_cells`] or [`GridEngine::is_lost`].
///
/// Each engine owns its RNG, so separate engines never share state. A single
/// engine is `Send` but not synchronized; guard it yourself if several
/// threads need it.
#[derive(Clone)]
pub struct GridEngine {
    board: Board,
    open_cells: Vec<Coord>,
    rng: StdRng,
}

impl GridEngine {
    /// Empty 4x4 board with an OS-seeded RNG
    pub fn new() -> Self {
        Self::from_parts(Board::default(), StdRng::from_os_rng())
    }

    /// Empty 4x4 board with a deterministic RNG, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::from_parts(Board::default(), StdRng::seed_from_u64(seed))
    }

    /// Copy the given rows into a new engine.
    ///
    /// Fails with [`GridError::InvalidGridShape`] when the rows differ in
    /// length, [`GridError::EmptyGrid`] when there is nothing to copy, and
    /// [`GridError::InvalidTile`] when a value is not 0 or a power of two.
    pub fn from_matrix<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GridError> {
        let board = Board::from_rows(rows)?;
        Ok(Self::from_parts(board, StdRng::from_os_rng()))
    }

    /// Empty board of any size, seeded when `seed` is given.
    pub fn with_dimensions(
        rows: usize,
        cols: usize,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        let board = Board::new(rows, cols)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::from_parts(board, rng))
    }

    fn from_parts(board: Board, rng: StdRng) -> Self {
        GridEngine {
            board,
            open_cells: Vec::new(),
            rng,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the current tiles, one `Vec` per row.
    pub fn to_matrix(&self) -> Vec<Vec<u32>> {
        self.board.to_rows()
    }

    /// Open cells as of the last refresh.
    pub fn open_cells(&self) -> &[Coord] {
        &self.open_cells
    }

    pub fn score(&self) -> u64 {
        self.board.score()
    }

    pub fn highest_tile(&self) -> u32 {
        self.board.highest_tile()
    }

    /// Rescan the board and rebuild the open-cell set.
    pub fn refresh_open_cells(&mut self) {
        self.open_cells = self.board.open_cells();
        trace!("{} open cells", self.open_cells.len());
    }

    /// Put a 2 (90%) or a 4 (10%) on a uniformly chosen open cell.
    ///
    /// Unlike [`GridEngine::is_lost`], this does not trust the cached
    /// open-cell set: it rescans the board first, so an engine that was
    /// never refreshed still gets a tile. It is a no-op only when the board
    /// itself is full. The chosen cell is removed from the set afterwards.
    /// Returns where the tile landed, or `None` when the board is full.
    pub fn spawn_random_tile(&mut self) -> Option<Coord> {
        self.refresh_open_cells();
        if self.open_cells.is_empty() {
            return None;
        }

        let idx = self.rng.random_range(0..self.open_cells.len());
        let coord = self.open_cells.remove(idx);
        let value = if self.rng.random::<f64>() < FOUR_PROBABILITY {
            4
        } else {
            2
        };
        self.board.set(coord, value);
        debug!("spawned {value} at ({}, {})", coord.row, coord.col);
        Some(coord)
    }

    /// Refresh the open cells and spawn `count` tiles, the usual opening.
    pub fn start(&mut self, count: usize) {
        for _ in 0..count {
            self.spawn_random_tile();
        }
        self.refresh_open_cells();
    }

    /// Slide and merge toward `direction`.
    ///
    /// Does not spawn a tile, refresh the open cells, or report whether
    /// anything moved; compare [`GridEngine::board`] before and after if
    /// that matters.
    pub fn apply_move(&mut self, direction: Direction) {
        self.board.slide(direction);
        debug!("moved {}, score {}", direction.name(), self.board.score());
    }

    /// Apply the move named by `letter` (`U`, `D`, `L`, `R`). Any other
    /// letter is ignored.
    pub fn apply_move_letter(&mut self, letter: char) {
        match Direction::from_letter(letter) {
            Some(direction) => self.apply_move(direction),
            None => trace!("ignoring move letter {letter:?}"),
        }
    }

    /// True when the open-cell set is empty.
    ///
    /// This only looks at occupancy: a full board is lost even if two
    /// neighbouring tiles could still merge.
    pub fn is_lost(&self) -> bool {
        self.open_cells.is_empty()
    }

    /// Write the board as text, `-` for empty cells.
    pub fn write_grid<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.board.write_grid(out)
    }

    /// Write the board with the current open-cell set marked as `**`.
    pub fn write_open_cells<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.board.write_marked(out, &self.open_cells)
    }

    /// Print the board to stdout
    pub fn print(&self) -> io::Result<()> {
        self.write_grid(&mut io::stdout().lock())
    }

    /// Print the board to stdout with open cells marked
    pub fn print_open_cells(&self) -> io::Result<()> {
        self.write_open_cells(&mut io::stdout().lock())
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new()
    }
}
