//! Train command - run maze generation and hybrid agent training

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    agent::HybridAgent,
    cli::output,
    env::MazeEnv,
    export::CsvLogger,
    maze::{self, MazeParams},
    pipeline::{ProgressObserver, TrainingConfig, TrainingSession},
    render::{StdinControl, TermRenderer},
};

#[derive(Parser, Debug)]
#[command(about = "Train the hybrid agent on a generated maze")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 300)]
    pub episodes: usize,

    /// Run a greedy evaluation episode every N training episodes (0 disables)
    #[arg(long, default_value_t = 50)]
    pub eval_every: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 15)]
    pub rows: usize,

    /// Maze width in cells
    #[arg(long, default_value_t = 15)]
    pub cols: usize,

    /// Probability that a sampled cell is a wall
    #[arg(long, default_value_t = 0.25)]
    pub wall_density: f64,

    /// Random seed for maze generation and exploration
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maze sampling attempts before the all-free fallback
    #[arg(long, default_value_t = 250)]
    pub max_tries: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.99)]
    pub gamma: f64,

    /// Exploration rate
    #[arg(long, default_value_t = 0.25)]
    pub epsilon: f64,

    /// Within exploration, probability of A*-guided movement
    #[arg(long, default_value_t = 0.30)]
    pub heuristic_rate: f64,

    /// Step budget per episode
    #[arg(long, default_value_t = 600)]
    pub max_steps: usize,

    /// Render the maze to the terminal while training
    #[arg(long, default_value_t = false)]
    pub visual: bool,

    /// Accept interactive line commands on stdin (requires --visual)
    #[arg(long, default_value_t = true)]
    pub interactive: bool,

    /// Target frame rate for the terminal display
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Base path for the step/episode CSV streams
    #[arg(long, default_value = "training_logs.csv")]
    pub log_file: PathBuf,

    /// Optional path for a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let maze_params = MazeParams {
        rows: args.rows,
        cols: args.cols,
        wall_density: args.wall_density,
        seed: Some(args.seed),
        max_tries: args.max_tries,
    };
    maze_params.validate()?;

    let config = TrainingConfig {
        episodes: args.episodes,
        eval_every: args.eval_every,
        alpha: args.alpha,
        gamma: args.gamma,
        epsilon: args.epsilon,
        heuristic_rate: args.heuristic_rate,
        max_steps_per_episode: args.max_steps,
        visual: args.visual,
        interactive: args.interactive,
        fps: args.fps,
        log_path: args.log_file,
    };
    config.validate()?;

    let maze = maze::generate(&maze_params);
    let env = MazeEnv::new(&maze.grid, maze.start, maze.goal, config.max_steps_per_episode);
    let agent = HybridAgent::new(config.alpha, config.gamma, config.epsilon, config.heuristic_rate)
        .with_seed(args.seed);

    let mut session = TrainingSession::new(config.clone(), env, agent)
        .with_observer(Box::new(CsvLogger::new(&config.log_path)?));
    // the progress bar and the frame renderer both write to the terminal;
    // visual mode keeps only the renderer
    if args.progress && !config.visual {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }
    if config.visual {
        session = session.with_renderer(Box::new(TermRenderer::new(config.fps)));
        if config.interactive {
            session = session.with_control(Box::new(StdinControl::spawn()));
        }
    }

    let result = session.run()?;

    output::print_section("Training complete");
    println!(
        "episodes: {}  successes: {} ({:.1}%)",
        result.episodes,
        result.successes,
        result.success_rate * 100.0,
    );
    println!(
        "avg reward: {:.1}  avg steps: {:.1}",
        result.avg_reward, result.avg_steps,
    );
    println!("logs: {}", config.log_path.display());

    if let Some(path) = args.summary {
        result.save(&path)?;
        println!("summary written to {}", path.display());
    }

    Ok(())
}
