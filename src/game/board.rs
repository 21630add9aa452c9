use std::fmt;
use std::io::{self, Write};

use super::direction::Direction;
use crate::error::GridError;

pub const ROWS: usize = 4;
pub const COLS: usize = 4;

/// Width of one column in the text dump.
const CELL_WIDTH: usize = 5;

/// A (row, column) position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

/// An R x C matrix of tile values. 0 is an empty cell, anything else is a
/// power of two.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![0; rows * cols],
        })
    }

    /// Copy a board out of a list of rows.
    ///
    /// Every row must have the same length as the first one, and every value
    /// must be 0 or a power of two.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if let Some((r, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != cols)
        {
            return Err(GridError::InvalidGridShape {
                row: r,
                expected: cols,
                found: row.as_ref().len(),
            });
        }
        let mut board = Board::new(rows.len(), cols)?;

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            for (c, &value) in row.iter().enumerate() {
                if value != 0 && !value.is_power_of_two() {
                    return Err(GridError::InvalidTile {
                        row: r,
                        col: c,
                        value,
                    });
                }
            }
            board.row_mut(r).copy_from_slice(row);
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the value at a specific position
    /// Row 0 is the top, column 0 is the left edge
    pub fn get(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) is off the board");
        self.cells[row * self.cols + col]
    }

    /// Value at `coord`, or `None` if it lies outside the board.
    pub fn tile(&self, coord: Coord) -> Option<u32> {
        if coord.row < self.rows && coord.col < self.cols {
            Some(self.cells[coord.row * self.cols + coord.col])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, coord: Coord, value: u32) {
        assert!(
            coord.row < self.rows && coord.col < self.cols,
            "{coord:?} is off the board"
        );
        self.cells[coord.row * self.cols + coord.col] = value;
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[u32] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    fn row_mut(&mut self, row: usize) -> &mut [u32] {
        &mut self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy the board out as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    /// Sum of every tile on the board.
    pub fn score(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Largest tile on the board, 0 if it is empty.
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Scan the board for empty cells, in row-major order.
    pub fn open_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| Coord::new(i / self.cols, i % self.cols))
            .collect()
    }

    /// Compact every row toward column 0.
    pub fn shift_left(&mut self) {
        for r in 0..self.rows {
            shift_row(self.row_mut(r));
        }
    }

    /// Merge equal left pairs in every row (single pass).
    pub fn merge_left(&mut self) {
        for r in 0..self.rows {
            merge_row(self.row_mut(r));
        }
    }

    /// The board rotated 90 degrees clockwise. A non-square board comes back
    /// with its dimensions swapped.
    pub fn rotated_clockwise(&self) -> Board {
        // transpose, then reverse each row
        let mut cells = vec![0; self.cells.len()];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c * self.rows + (self.rows - 1 - r)] = self.cells[r * self.cols + c];
            }
        }
        Board {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    pub(crate) fn rotate_clockwise(&mut self) {
        *self = self.rotated_clockwise();
    }

    /// Slide and merge every tile toward `direction`.
    ///
    /// The board is rotated so `direction` points left, shifted, merged and
    /// shifted again, then rotated back.
    pub fn slide(&mut self, direction: Direction) {
        let turns = direction.rotations();
        for _ in 0..turns {
            self.rotate_clockwise();
        }

        self.shift_left();
        self.merge_left();
        self.shift_left();

        for _ in 0..(4 - turns) % 4 {
            self.rotate_clockwise();
        }
    }

    /// Write the board, one row per line. Empty cells are `-`.
    pub fn write_grid<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_with(out, |_| false)
    }

    /// Write the board with every cell in `open` marked as `**`.
    pub fn write_marked<W: Write>(&self, out: &mut W, open: &[Coord]) -> io::Result<()> {
        self.write_with(out, |coord| open.contains(&coord))
    }

    fn write_with<W, F>(&self, out: &mut W, marked: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(Coord) -> bool,
    {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let value = self.get(r, c);
                let glyph = if marked(Coord::new(r, c)) {
                    "**".to_string()
                } else if value == 0 {
                    "-".to_string()
                } else {
                    value.to_string()
                };
                write!(out, "{:<width$}", glyph, width = CELL_WIDTH)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![0; ROWS * COLS],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.write_grid(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// Stable compaction of the nonzero values in `row` toward index 0.
pub fn shift_row(row: &mut [u32]) {
    let mut next = 0;
    for i in 0..row.len() {
        if row[i] != 0 {
            let value = row[i];
            row[i] = 0;
            row[next] = value;
            next += 1;
        }
    }
}

/// One left-to-right merge pass: a cell equal to its left neighbour doubles
/// that neighbour and empties itself.
///
/// A pair whose double does not fit in a `u32` (two 2^31 tiles) stays
/// unmerged.
pub fn merge_row(row: &mut [u32]) {
    for i in 1..row.len() {
        if row[i] != 0 && row[i] == row[i - 1] {
            if let Some(doubled) = row[i - 1].checked_mul(2) {
                row[i - 1] = doubled;
                row[i] = 0;
            }
        }
    }
}
