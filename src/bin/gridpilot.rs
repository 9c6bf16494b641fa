//! gridpilot CLI - hybrid A*/Q-learning maze navigation toolkit
//!
//! This CLI provides a unified interface for:
//! - Training the hybrid agent on procedurally generated mazes
//! - Inspecting generated mazes and their shortest paths

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridpilot")]
#[command(version, about = "Hybrid A*/Q-learning maze navigation toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the hybrid agent on a generated maze
    Train(Box<gridpilot::cli::commands::train::TrainArgs>),

    /// Generate a maze and print its shortest path
    Solve(gridpilot::cli::commands::solve::SolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => gridpilot::cli::commands::train::execute(*args),
        Commands::Solve(args) => gridpilot::cli::commands::solve::execute(args),
    }
}
