//! Deterministic maze environment
//!
//! Owns the per-episode state (agent position, step counter, terminal flag)
//! while only borrowing the grid. Rewards are fixed: +100 for reaching the
//! goal, -10 for bumping a wall or the boundary, -1 per ordinary step.

use crate::{
    action::Action,
    grid::{Coord, Grid},
};

pub const GOAL_REWARD: f64 = 100.0;
pub const COLLISION_PENALTY: f64 = -10.0;
pub const STEP_PENALTY: f64 = -1.0;

/// Result of a single environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: Coord,
    pub reward: f64,
    pub done: bool,
}

/// Per-episode maze environment over a borrowed grid
#[derive(Debug)]
pub struct MazeEnv<'g> {
    grid: &'g Grid,
    agent_pos: Coord,
    start: Coord,
    goal: Coord,
    max_steps: usize,
    steps: usize,
    done: bool,
}

impl<'g> MazeEnv<'g> {
    pub fn new(grid: &'g Grid, start: Coord, goal: Coord, max_steps: usize) -> Self {
        Self {
            grid,
            agent_pos: start,
            start,
            goal,
            max_steps,
            steps: 0,
            done: false,
        }
    }

    /// Restore the start position, zero the step counter, clear the
    /// terminal flag. Returns the start coordinate.
    pub fn reset(&mut self) -> Coord {
        self.agent_pos = self.start;
        self.steps = 0;
        self.done = false;
        self.agent_pos
    }

    fn target(&self, action: Action) -> Option<Coord> {
        let (dr, dc) = action.delta();
        self.agent_pos.offset(dr, dc)
    }

    /// Whether `action` leads to an in-bounds free cell.
    ///
    /// Always false once the episode has terminated.
    pub fn is_valid_move(&self, action: Action) -> bool {
        !self.done
            && self
                .target(action)
                .is_some_and(|next| self.grid.is_free(next))
    }

    /// Apply one action.
    ///
    /// Stepping a terminated episode is a no-op returning reward 0 and
    /// done=true. Otherwise the step counter advances unconditionally:
    /// collisions consume step budget without moving the agent, which keeps
    /// episodes bounded even under persistent wall-bumping.
    pub fn step(&mut self, action: Action) -> Transition {
        if self.done {
            return Transition {
                state: self.agent_pos,
                reward: 0.0,
                done: true,
            };
        }

        self.steps += 1;

        match self.target(action) {
            Some(next) if self.grid.is_free(next) => {
                self.agent_pos = next;

                if self.agent_pos == self.goal {
                    self.done = true;
                    return Transition {
                        state: self.agent_pos,
                        reward: GOAL_REWARD,
                        done: true,
                    };
                }

                if self.steps >= self.max_steps {
                    self.done = true;
                    return Transition {
                        state: self.agent_pos,
                        reward: STEP_PENALTY,
                        done: true,
                    };
                }

                Transition {
                    state: self.agent_pos,
                    reward: STEP_PENALTY,
                    done: false,
                }
            }
            _ => {
                // wall or out of bounds: position unchanged
                if self.steps >= self.max_steps {
                    self.done = true;
                    return Transition {
                        state: self.agent_pos,
                        reward: COLLISION_PENALTY,
                        done: true,
                    };
                }

                Transition {
                    state: self.agent_pos,
                    reward: COLLISION_PENALTY,
                    done: false,
                }
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    pub fn agent_pos(&self) -> Coord {
        self.agent_pos
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn open_env(grid: &Grid, start: Coord, goal: Coord) -> MazeEnv<'_> {
        MazeEnv::new(grid, start, goal, 600)
    }

    #[test]
    fn reset_returns_the_start_position() {
        let grid = Grid::open(5, 5);
        let mut env = open_env(&grid, Coord::new(0, 0), Coord::new(4, 4));
        env.step(Action::Down);
        assert_eq!(env.reset(), Coord::new(0, 0));
        assert_eq!(env.steps(), 0);
        assert!(!env.is_done());
    }

    #[test]
    fn valid_move_updates_position_with_step_penalty() {
        let grid = Grid::open(5, 5);
        let mut env = open_env(&grid, Coord::new(2, 2), Coord::new(4, 4));
        env.reset();
        let t = env.step(Action::Down);
        assert_eq!(t.state, Coord::new(3, 2));
        assert_eq!(t.reward, STEP_PENALTY);
        assert!(!t.done);
    }

    #[test]
    fn wall_collision_keeps_position_and_penalizes() {
        let grid = Grid::parse(&[".....", ".....", "..##.", ".....", "....."]);
        let mut env = open_env(&grid, Coord::new(2, 1), Coord::new(4, 4));
        env.reset();
        let t = env.step(Action::Right);
        assert_eq!(t.state, Coord::new(2, 1));
        assert_eq!(t.reward, COLLISION_PENALTY);
        assert!(!t.done);
        assert_eq!(env.steps(), 1);
    }

    #[test]
    fn boundary_collision_behaves_like_a_wall() {
        let grid = Grid::open(3, 3);
        let mut env = open_env(&grid, Coord::new(0, 0), Coord::new(2, 2));
        env.reset();
        let t = env.step(Action::Up);
        assert_eq!(t.state, Coord::new(0, 0));
        assert_eq!(t.reward, COLLISION_PENALTY);
        assert!(!t.done);
    }

    #[test]
    fn reaching_the_goal_rewards_and_terminates() {
        let grid = Grid::open(5, 5);
        let mut env = open_env(&grid, Coord::new(0, 0), Coord::new(0, 1));
        env.reset();
        let t = env.step(Action::Right);
        assert_eq!(t.state, Coord::new(0, 1));
        assert_eq!(t.reward, GOAL_REWARD);
        assert!(t.done);
        assert!(env.is_done());
    }

    #[test]
    fn goal_on_the_final_budgeted_step_still_pays_out() {
        let grid = Grid::open(5, 5);
        let mut env = MazeEnv::new(&grid, Coord::new(0, 0), Coord::new(0, 1), 1);
        env.reset();
        let t = env.step(Action::Right);
        assert_eq!(t.reward, GOAL_REWARD);
        assert!(t.done);
    }

    #[test]
    fn step_cap_terminates_with_the_matching_reward() {
        let grid = Grid::open(5, 5);
        let mut env = MazeEnv::new(&grid, Coord::new(0, 0), Coord::new(4, 4), 2);
        env.reset();
        let first = env.step(Action::Down);
        assert!(!first.done);
        let second = env.step(Action::Down);
        assert!(second.done);
        assert_eq!(second.reward, STEP_PENALTY);
    }

    #[test]
    fn collisions_consume_step_budget() {
        let grid = Grid::open(3, 3);
        let mut env = MazeEnv::new(&grid, Coord::new(0, 0), Coord::new(2, 2), 2);
        env.reset();
        env.step(Action::Up);
        let t = env.step(Action::Up);
        assert_eq!(t.reward, COLLISION_PENALTY);
        assert!(t.done);
        assert_eq!(t.state, Coord::new(0, 0));
    }

    #[test]
    fn stepping_a_terminated_episode_is_a_no_op() {
        let grid = Grid::open(5, 5);
        let mut env = open_env(&grid, Coord::new(0, 0), Coord::new(0, 1));
        env.reset();
        env.step(Action::Right);
        let t = env.step(Action::Down);
        assert_eq!(t.state, Coord::new(0, 1));
        assert_eq!(t.reward, 0.0);
        assert!(t.done);
        assert_eq!(env.steps(), 1);
    }

    #[test]
    fn no_moves_are_valid_after_termination() {
        let grid = Grid::open(5, 5);
        let mut env = open_env(&grid, Coord::new(0, 0), Coord::new(0, 1));
        env.reset();
        assert!(env.is_valid_move(Action::Right));
        env.step(Action::Right);
        for action in Action::ALL {
            assert!(!env.is_valid_move(action));
        }
    }
}
