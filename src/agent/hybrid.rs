//! Hybrid decision policy and tabular TD update

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    action::Action,
    agent::{ActionSource, QTable},
    env::MazeEnv,
    grid::Coord,
    pathfinder,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent with A*-guided exploration
///
/// On each decision the agent exploits greedily with probability
/// `1 - epsilon`; otherwise it explores, following the A* path toward the
/// goal with probability `heuristic_rate` and moving uniformly at random
/// among valid actions the rest of the time. Values are updated with the
/// standard one-step off-policy rule
/// `Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`.
#[derive(Debug)]
pub struct HybridAgent {
    q: QTable,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    heuristic_rate: f64,
    rng: StdRng,
}

impl HybridAgent {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64, heuristic_rate: f64) -> Self {
        Self {
            q: QTable::new(),
            alpha,
            gamma,
            epsilon,
            heuristic_rate,
            rng: build_rng(None),
        }
    }

    /// Seed the exploration RNG for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Choose an action for `state`, reporting which policy branch
    /// produced it.
    ///
    /// The heuristic branch only fires when A* finds a path of at least two
    /// cells whose first move is valid right now; otherwise exploration
    /// falls back to a uniform choice among valid actions, or among all
    /// four when the agent is fully boxed in.
    pub fn decide(&mut self, state: Coord, env: &MazeEnv<'_>) -> (Action, ActionSource) {
        self.q.ensure(state);

        if self.rng.random::<f64>() < self.epsilon {
            if self.rng.random::<f64>() < self.heuristic_rate
                && let Some(path) = pathfinder::find_path(env.grid(), state, env.goal())
                && let Ok(Some(action)) = pathfinder::next_move(&path)
                && env.is_valid_move(action)
            {
                return (action, ActionSource::Astar);
            }

            let valid: Vec<Action> = Action::ALL
                .into_iter()
                .filter(|&a| env.is_valid_move(a))
                .collect();
            if let Some(&action) = valid.choose(&mut self.rng) {
                return (action, ActionSource::RandomValid);
            }

            let action = Action::ALL[self.rng.random_range(0..Action::ALL.len())];
            return (action, ActionSource::Random);
        }

        (self.q.greedy_action(state), ActionSource::Greedy)
    }

    /// One-step temporal-difference update, in place.
    ///
    /// Both state rows are materialized before the read. Never fails.
    pub fn update(&mut self, state: Coord, action: Action, reward: f64, next_state: Coord) {
        self.q.ensure(state);
        self.q.ensure(next_state);

        let best_next = self.q.max_q(next_state);
        let row = self.q.ensure(state);
        let old = row[action.index()];
        row[action.index()] = old + self.alpha * (reward + self.gamma * best_next - old);
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn heuristic_rate(&self) -> f64 {
        self.heuristic_rate
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn set_heuristic_rate(&mut self, heuristic_rate: f64) {
        self.heuristic_rate = heuristic_rate;
    }

    pub fn q_table(&self) -> &QTable {
        &self.q
    }

    /// Forget everything learned so far
    pub fn reset_q_table(&mut self) {
        self.q.clear();
    }
}
