//! gridpilot - hybrid A*/Q-learning maze navigation toolkit
//!
//! This crate provides:
//! - Procedural maze generation with a solvability guarantee
//! - An A* pathfinding engine shared by generation and exploration
//! - A tabular Q-learning agent with A*-guided heuristic exploration
//! - A training controller with interleaved greedy evaluation, rolling
//!   statistics, CSV logging, and cooperative interactive controls

pub mod action;
pub mod agent;
pub mod cli;
pub mod env;
pub mod error;
pub mod export;
pub mod grid;
pub mod maze;
pub mod pathfinder;
pub mod pipeline;
pub mod ports;
pub mod render;

pub use action::Action;
pub use agent::{ActionSource, HybridAgent, QTable};
pub use env::{MazeEnv, Transition};
pub use error::{Error, Result};
pub use grid::{Cell, Coord, Grid};
pub use maze::{Maze, MazeParams};
pub use pipeline::{TrainingConfig, TrainingResult, TrainingSession};
