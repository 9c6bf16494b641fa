//! Output formatting helpers for the CLI

use std::collections::HashSet;

use crate::grid::{Coord, Grid};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Render a maze as ASCII, overlaying a path with `*`
///
/// `S` marks the start, `G` the goal, `#` walls, `.` free cells.
pub fn render_maze(grid: &Grid, start: Coord, goal: Coord, path: &[Coord]) -> String {
    let on_path: HashSet<Coord> = path.iter().copied().collect();
    let mut out = String::with_capacity((grid.cols() + 1) * grid.rows());
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let at = Coord::new(r, c);
            let glyph = if at == start {
                'S'
            } else if at == goal {
                'G'
            } else if on_path.contains(&at) {
                '*'
            } else if grid.is_free(at) {
                '.'
            } else {
                '#'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maze_rendering_marks_endpoints_and_path() {
        let grid = Grid::parse(&["..#", "...", "#.."]);
        let path = [
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(2, 2),
        ];
        let rendered = render_maze(&grid, Coord::new(0, 0), Coord::new(2, 2), &path);
        assert_eq!(rendered, "S*#\n.**\n#.G\n");
    }
}
