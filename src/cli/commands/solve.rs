//! Solve command - generate a maze and print its A* solution

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    cli::output,
    maze::{self, MazeParams},
    pathfinder,
};

#[derive(Parser, Debug)]
#[command(about = "Generate a maze and print its shortest path")]
pub struct SolveArgs {
    /// Maze height in cells
    #[arg(long, default_value_t = 15)]
    pub rows: usize,

    /// Maze width in cells
    #[arg(long, default_value_t = 15)]
    pub cols: usize,

    /// Probability that a sampled cell is a wall
    #[arg(long, default_value_t = 0.25)]
    pub wall_density: f64,

    /// Random seed for maze generation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maze sampling attempts before the all-free fallback
    #[arg(long, default_value_t = 250)]
    pub max_tries: usize,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let params = MazeParams {
        rows: args.rows,
        cols: args.cols,
        wall_density: args.wall_density,
        seed: Some(args.seed),
        max_tries: args.max_tries,
    };
    params.validate()?;

    let maze = maze::generate(&params);
    let Some(path) = pathfinder::find_path(&maze.grid, maze.start, maze.goal) else {
        // generation guarantees solvability; reaching this means the
        // generator contract is broken
        bail!("generated maze has no start-to-goal path");
    };

    output::print_section(&format!("{}x{} maze, seed {}", args.rows, args.cols, args.seed));
    print!(
        "{}",
        output::render_maze(&maze.grid, maze.start, maze.goal, &path)
    );
    output::print_subsection(&format!(
        "shortest path: {} cells ({} moves)",
        path.len(),
        path.len() - 1,
    ));

    Ok(())
}
