//! Q-table for temporal difference learning over grid states

use std::collections::HashMap;

use crate::{action::Action, grid::Coord};

/// Action-value table keyed by grid coordinate
///
/// Rows are created lazily on first access, initialized to zero, and grow
/// monotonically within a run. The table is owned exclusively by the
/// [`HybridAgent`](super::HybridAgent).
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<Coord, [f64; 4]>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The row for `state`, created zero-initialized if absent
    pub fn ensure(&mut self, state: Coord) -> &mut [f64; 4] {
        self.values.entry(state).or_insert([0.0; 4])
    }

    /// Copy of the row for `state`; zeros when the state is unseen
    pub fn values(&self, state: Coord) -> [f64; 4] {
        self.values.get(&state).copied().unwrap_or([0.0; 4])
    }

    /// Q-value for a state-action pair
    pub fn get(&self, state: Coord, action: Action) -> f64 {
        self.values(state)[action.index()]
    }

    /// Maximum action value at `state`; 0.0 for unseen states
    pub fn max_q(&self, state: Coord) -> f64 {
        self.values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Action with the highest value at `state`.
    ///
    /// Scans in `Action::ALL` order keeping only strict improvements, so
    /// ties resolve to the lowest enumerant index.
    pub fn greedy_action(&self, state: Coord) -> Action {
        let q = self.values(state);
        let mut best = Action::Up;
        for action in Action::ALL {
            if q[action.index()] > q[best.index()] {
                best = action;
            }
        }
        best
    }

    /// Number of states with a materialized row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every row; subsequent lookups re-initialize to zero
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_states_read_as_zero() {
        let table = QTable::new();
        let state = Coord::new(3, 3);
        assert_eq!(table.values(state), [0.0; 4]);
        assert_eq!(table.get(state, Action::Left), 0.0);
        assert_eq!(table.max_q(state), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn ensure_materializes_a_zero_row() {
        let mut table = QTable::new();
        let state = Coord::new(1, 2);
        assert_eq!(*table.ensure(state), [0.0; 4]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn max_q_reflects_written_values() {
        let mut table = QTable::new();
        let state = Coord::new(0, 0);
        table.ensure(state)[Action::Down.index()] = 2.5;
        table.ensure(state)[Action::Left.index()] = -1.0;
        assert_eq!(table.max_q(state), 2.5);
    }

    #[test]
    fn greedy_action_breaks_ties_toward_the_lowest_index() {
        let mut table = QTable::new();
        let state = Coord::new(2, 2);
        assert_eq!(table.greedy_action(state), Action::Up);

        table.ensure(state)[Action::Down.index()] = 1.0;
        table.ensure(state)[Action::Right.index()] = 1.0;
        assert_eq!(table.greedy_action(state), Action::Down);
    }

    #[test]
    fn clear_empties_the_table_completely() {
        let mut table = QTable::new();
        table.ensure(Coord::new(0, 0))[0] = 5.0;
        table.ensure(Coord::new(1, 1));
        assert_eq!(table.len(), 2);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(Coord::new(0, 0), Action::Up), 0.0);
    }
}
