//! Grid model shared by maze generation, pathfinding, and the environment
//!
//! A [`Grid`] is generated once per maze and then only read: the environment
//! borrows it for an episode set, and the pathfinder treats it as a pure
//! input. Mutation stops at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell position as (row, col)
///
/// Value type used as the agent state and as the Q-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a coordinate at (row, col)
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a (row, col) delta, returning `None` when the result would
    /// leave the non-negative quadrant
    pub fn offset(self, dr: isize, dc: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Coord { row, col })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Occupancy marker for a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Wall,
}

/// Rectangular occupancy grid, immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell free
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Free; rows * cols],
        }
    }

    /// Create a grid by sampling each cell from `f(row, col)`
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Cell) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Self { rows, cols, cells }
    }

    /// Parse an ASCII map where `#` marks a wall and any other character a
    /// free cell. All rows must have equal length.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpilot::grid::{Cell, Coord, Grid};
    ///
    /// let grid = Grid::parse(&[".#.", "...", ".#."]);
    /// assert_eq!(grid.get(Coord::new(0, 1)), Some(Cell::Wall));
    /// assert!(grid.is_free(Coord::new(1, 1)));
    /// ```
    pub fn parse(rows: &[&str]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "all grid rows must have equal length"
        );
        Self::from_fn(rows.len(), cols, |r, c| {
            if rows[r].as_bytes()[c] == b'#' {
                Cell::Wall
            } else {
                Cell::Free
            }
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `at` lies within the grid on both axes
    pub fn in_bounds(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    /// Cell at `at`, or `None` when out of bounds
    pub fn get(&self, at: Coord) -> Option<Cell> {
        self.in_bounds(at)
            .then(|| self.cells[at.row * self.cols + at.col])
    }

    /// Whether `at` is in bounds and free
    pub fn is_free(&self, at: Coord) -> bool {
        self.get(at) == Some(Cell::Free)
    }

    /// Whether every cell in the grid is free
    pub fn is_open(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Cell::Free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_moves_off_the_quadrant() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Coord::new(1, 1)));
    }

    #[test]
    fn open_grid_is_fully_free() {
        let grid = Grid::open(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert!(grid.is_open());
        assert!(grid.is_free(Coord::new(2, 3)));
    }

    #[test]
    fn out_of_bounds_is_not_free() {
        let grid = Grid::open(2, 2);
        assert!(!grid.is_free(Coord::new(2, 0)));
        assert!(!grid.is_free(Coord::new(0, 2)));
        assert_eq!(grid.get(Coord::new(5, 5)), None);
    }

    #[test]
    fn parse_reads_walls() {
        let grid = Grid::parse(&["..#", "#.."]);
        assert_eq!(grid.get(Coord::new(0, 2)), Some(Cell::Wall));
        assert_eq!(grid.get(Coord::new(1, 0)), Some(Cell::Wall));
        assert!(grid.is_free(Coord::new(0, 0)));
        assert!(!grid.is_open());
    }
}
