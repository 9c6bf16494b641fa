//! Directional actions over the grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The four moves available to the agent
///
/// Each action maps to a fixed (row, col) delta. The enumerant order is
/// load-bearing: pathfinding expands neighbors and the greedy policy breaks
/// ties in `ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in the fixed traversal order UP, DOWN, LEFT, RIGHT
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// The (row, col) delta this action applies
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Stable index of this action within [`Action::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Look an action up by its index, failing fast on out-of-range values
    pub fn from_index(index: usize) -> Result<Action> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidAction { action: index })
    }

    /// The action matching a unit (row, col) delta, if any
    pub fn from_delta(dr: isize, dc: isize) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.delta() == (dr, dc))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        };
        f.write_str(name)
    }
}
