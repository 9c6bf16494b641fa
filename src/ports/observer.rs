//! Observer port - abstraction for training observation and data collection
//!
//! Observers allow composable data collection during training without
//! coupling the episode loop to specific output formats.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{action::Action, agent::ActionSource, error::Result};

/// Episode kind: exploring-and-learning, or greedy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Train,
    Eval,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Train => "train",
            Mode::Eval => "eval",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One environment step, recorded after the transition has applied
///
/// `row`/`col` are the agent's post-step coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub episode: usize,
    /// 1-based step index within the episode
    pub t: usize,
    pub row: usize,
    pub col: usize,
    pub action: Action,
    pub reward: f64,
    pub done: bool,
    pub mode: Mode,
    pub source: ActionSource,
}

/// Summary of a completed (or stopped) episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub steps: usize,
    pub total_reward: f64,
    pub success: bool,
    pub mode: Mode,
    /// Seconds since training started
    pub elapsed_s: f64,
}

/// Observer trait for monitoring training
///
/// Methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode: `on_step(...)` per environment step, then
///    `on_episode_end(...)`
/// 3. `on_training_end()` - once at the end; flush durable outputs here
///
/// All methods default to no-ops so observers only implement the events
/// they care about.
pub trait TrainingObserver {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_step(&mut self, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _record: &EpisodeRecord) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
