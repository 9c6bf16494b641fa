//! A* shortest paths over 4-connected free cells
//!
//! Pure functions of a grid plus endpoints: the maze generator uses them to
//! accept only solvable samples, and the hybrid agent uses them to bias its
//! exploration toward the goal. Unit edge cost with a Manhattan heuristic,
//! which is admissible and consistent on a 4-connected grid, so the first
//! time the goal leaves the frontier the path is shortest.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
};

use crate::{
    action::Action,
    error::{Error, Result},
    grid::{Coord, Grid},
};

/// Manhattan distance between two cells
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Frontier entry ordered for a min-heap on (f, g, coordinate).
///
/// Including the coordinate keeps expansion order fully deterministic for a
/// fixed grid and endpoints.
#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    f: usize,
    g: usize,
    at: Coord,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.at.cmp(&self.at))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `goal`, or `None` when the two are not
/// connected through free cells.
///
/// Returns `[start]` when the endpoints coincide. Neighbors are expanded in
/// the fixed order UP, DOWN, LEFT, RIGHT.
pub fn find_path(grid: &Grid, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut open = BinaryHeap::new();
    open.push(Frontier {
        f: 0,
        g: 0,
        at: start,
    });

    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut g_score: HashMap<Coord, usize> = HashMap::from([(start, 0)]);
    let mut closed: HashSet<Coord> = HashSet::new();

    while let Some(Frontier { g, at, .. }) = open.pop() {
        if !closed.insert(at) {
            continue;
        }
        if at == goal {
            return Some(reconstruct(&came_from, at));
        }

        for action in Action::ALL {
            let (dr, dc) = action.delta();
            let Some(next) = at.offset(dr, dc) else {
                continue;
            };
            if !grid.is_free(next) {
                continue;
            }
            let ng = g + 1;
            if g_score.get(&next).is_none_or(|&best| ng < best) {
                g_score.insert(next, ng);
                came_from.insert(next, at);
                open.push(Frontier {
                    f: ng + manhattan(next, goal),
                    g: ng,
                    at: next,
                });
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Coord, Coord>, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        cur = prev;
        path.push(cur);
    }
    path.reverse();
    path
}

/// The action that takes `path[0]` to `path[1]`
///
/// Returns `Ok(None)` for empty and single-cell paths. Fails with
/// [`Error::MalformedPath`] when the first hop is not a unit 4-connected
/// move — paths produced by [`find_path`] never trip this, but externally
/// supplied paths can.
pub fn next_move(path: &[Coord]) -> Result<Option<Action>> {
    let (Some(&cur), Some(&next)) = (path.first(), path.get(1)) else {
        return Ok(None);
    };

    let dr = next.row as isize - cur.row as isize;
    let dc = next.col as isize - cur.col as isize;

    match Action::from_delta(dr, dc) {
        Some(action) => Ok(Some(action)),
        None => Err(Error::MalformedPath {
            from: cur,
            to: next,
        }),
    }
}
