//! Procedural maze generation with a solvability guarantee

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{Cell, Coord, Grid},
    pathfinder,
};

/// Parameters for maze sampling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeParams {
    pub rows: usize,
    pub cols: usize,
    /// Probability that a sampled cell is a wall
    pub wall_density: f64,
    /// Seed for the sampling RNG; `None` draws from entropy
    pub seed: Option<u64>,
    /// Sampling attempts before falling back to an all-free grid
    pub max_tries: usize,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 15,
            wall_density: 0.25,
            seed: Some(42),
            max_tries: 250,
        }
    }
}

impl MazeParams {
    /// Reject parameter combinations the generator cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.cols < 2 {
            return Err(Error::InvalidConfiguration {
                message: format!("maze must be at least 2x2, got {}x{}", self.rows, self.cols),
            });
        }
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(Error::InvalidConfiguration {
                message: format!("wall density must be in [0, 1], got {}", self.wall_density),
            });
        }
        if self.max_tries == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_tries must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A generated maze: the grid plus its fixed endpoints
#[derive(Debug, Clone)]
pub struct Maze {
    pub grid: Grid,
    pub start: Coord,
    pub goal: Coord,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Sample mazes until one is solvable.
///
/// The start is fixed at (0, 0) and the goal at (rows-1, cols-1); both are
/// forced free in every sample. After `max_tries` unsolvable samples the
/// generator returns an all-free grid instead of failing — a defined
/// fallback, not an error.
pub fn generate(params: &MazeParams) -> Maze {
    let mut rng = build_rng(params.seed);
    let start = Coord::new(0, 0);
    let goal = Coord::new(params.rows - 1, params.cols - 1);

    for _ in 0..params.max_tries {
        let grid = Grid::from_fn(params.rows, params.cols, |r, c| {
            let wall = rng.random::<f64>() < params.wall_density;
            let at = Coord::new(r, c);
            if at == start || at == goal {
                Cell::Free
            } else if wall {
                Cell::Wall
            } else {
                Cell::Free
            }
        });

        if is_solvable(&grid, start, goal) {
            return Maze { grid, start, goal };
        }
    }

    Maze {
        grid: Grid::open(params.rows, params.cols),
        start,
        goal,
    }
}

/// Whether a start-to-goal path exists through free cells
pub fn is_solvable(grid: &Grid, start: Coord, goal: Coord) -> bool {
    pathfinder::find_path(grid, start, goal).is_some()
}
