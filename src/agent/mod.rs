//! Hybrid Q-learning agent
//!
//! The agent owns the tabular value function and a seeded RNG, and decides
//! between greedy exploitation, A*-guided exploration, and uniform-random
//! exploration on every step.

mod hybrid;
mod q_table;

pub use hybrid::HybridAgent;
pub use q_table::QTable;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which branch of the decision policy produced an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    Greedy,
    Astar,
    RandomValid,
    Random,
}

impl ActionSource {
    /// Wire tag used in the step log
    pub fn as_str(self) -> &'static str {
        match self {
            ActionSource::Greedy => "greedy",
            ActionSource::Astar => "astar",
            ActionSource::RandomValid => "random_valid",
            ActionSource::Random => "random",
        }
    }
}

impl fmt::Display for ActionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
