//! Generation update for Conway's Game of Life on a torus.
//!
//! The engine never writes into the grid it reads from. [`step`] reads the current generation and
//! writes every cell of the next one into a separate buffer, which is what makes it safe to
//! compute rows in parallel.

use rayon::prelude::*;

use crate::Dimension;
use crate::cell::Cell;
use crate::grid::Grid;

/// Neighbor counts that bring a dead cell to life, one bit per count: b3
const BIRTHS: u16 = 1 << 3;

/// Neighbor counts that keep a live cell alive, one bit per count: s23
const SURVIVALS: u16 = (1 << 2) | (1 << 3);

/// The state of a cell in the next generation, given its current state and how many of its eight
/// neighbors are alive.
///
/// * A live cell with fewer than two live neighbors dies.
/// * A live cell with two or three live neighbors survives.
/// * A live cell with more than three live neighbors dies.
/// * A dead cell with exactly three live neighbors comes alive.
pub fn next_state(current: Cell, live_neighbors: u8) -> Cell {
    let count = 1u16.checked_shl(live_neighbors as u32).unwrap_or(0);

    let rule = match current {
        Cell::Dead => BIRTHS,
        Cell::Alive => SURVIVALS,
    };

    Cell::from(rule & count != 0)
}

/// Count the live cells among the eight neighbors of `(row, column)`, wrapping around every edge.
///
/// The cell itself is never counted, even when an offset wraps back onto it on a grid one cell
/// wide or tall. On grids narrower or shorter than three cells, several of the eight offsets can
/// land on the same neighbor and that neighbor is counted once per offset.
pub fn live_neighbor_count(grid: &Grid, row: Dimension, column: Dimension) -> u8 {
    let (width, height) = (grid.width(), grid.height());

    debug_assert!(row < height && column < width);

    let rows = [wrap_back(row, height), row, wrap_forward(row, height)];
    let columns = [wrap_back(column, width), column, wrap_forward(column, width)];

    let mut count = 0;

    for &r in &rows {
        for &c in &columns {
            // the cell itself
            if (r, c) == (row, column) {
                continue;
            }

            count += grid.cell(r, c) as u8;
        }
    }

    count
}

/// Write the generation following `current` into `next`.
///
/// Rows of `next` are filled concurrently. Each one depends only on `current`, which is never
/// written to, so the order they complete in doesn't matter.
///
/// # Panics
///
/// If `next` is not the same length as `current`.
pub fn step(current: &Grid, next: &mut [Cell]) {
    assert_eq!(
        next.len(),
        current.area(),
        "next generation buffer does not match a {}x{} grid",
        current.width(),
        current.height()
    );

    next.par_chunks_mut(current.width() as usize)
        .enumerate()
        .for_each(|(row, out)| {
            let row = row as Dimension;

            for (column, cell) in out.iter_mut().enumerate() {
                let column = column as Dimension;

                let live_neighbors = live_neighbor_count(current, row, column);
                *cell = next_state(current.cell(row, column), live_neighbors);
            }
        });
}

#[inline]
fn wrap_back(n: Dimension, len: Dimension) -> Dimension {
    if n == 0 { len - 1 } else { n - 1 }
}

#[inline]
fn wrap_forward(n: Dimension, len: Dimension) -> Dimension {
    if n + 1 == len { 0 } else { n + 1 }
}

#[cfg(test)]
mod tests {
    use super::live_neighbor_count;
    use super::next_state;
    use super::step;
    use crate::cell::Cell;
    use crate::grid::Grid;

    fn grid_with(width: u32, height: u32, alive: &[(u32, u32)]) -> Grid {
        Grid::create(width, height, |row, column| {
            Cell::from(alive.contains(&(row, column)))
        })
        .unwrap()
    }

    #[test]
    fn rule_table() {
        let cases = [
            (Cell::Alive, 0, Cell::Dead),
            (Cell::Alive, 1, Cell::Dead),
            (Cell::Alive, 2, Cell::Alive),
            (Cell::Alive, 3, Cell::Alive),
            (Cell::Alive, 4, Cell::Dead),
            (Cell::Alive, 8, Cell::Dead),
            (Cell::Dead, 0, Cell::Dead),
            (Cell::Dead, 2, Cell::Dead),
            (Cell::Dead, 3, Cell::Alive),
            (Cell::Dead, 4, Cell::Dead),
            (Cell::Dead, 8, Cell::Dead),
        ];

        for (current, live, want) in cases {
            assert_eq!(
                next_state(current, live),
                want,
                "{current:?} with {live} live neighbors"
            );
        }
    }

    #[test]
    fn rule_ignores_impossible_counts() {
        assert_eq!(next_state(Cell::Dead, 19), Cell::Dead);
        assert_eq!(next_state(Cell::Alive, u8::MAX), Cell::Dead);
    }

    #[test]
    fn count_excludes_self() {
        let grid = grid_with(5, 5, &[(2, 2)]);

        assert_eq!(live_neighbor_count(&grid, 2, 2), 0);
        assert_eq!(live_neighbor_count(&grid, 1, 1), 1);
        assert_eq!(live_neighbor_count(&grid, 3, 2), 1);
        assert_eq!(live_neighbor_count(&grid, 0, 0), 0);
    }

    #[test]
    fn count_full_neighborhood() {
        let all: Vec<_> = (0..5).flat_map(|r| (0..5).map(move |c| (r, c))).collect();
        let grid = grid_with(5, 5, &all);

        for row in 0..5 {
            for column in 0..5 {
                assert_eq!(live_neighbor_count(&grid, row, column), 8);
            }
        }
    }

    #[test]
    fn count_wraps_corners() {
        let (w, h) = (7, 5);
        let grid = grid_with(w, h, &[(h - 1, w - 1)]);

        assert_eq!(live_neighbor_count(&grid, 0, 0), 1);
        assert_eq!(live_neighbor_count(&grid, 0, w - 1), 1);
        assert_eq!(live_neighbor_count(&grid, h - 1, 0), 1);
        assert_eq!(live_neighbor_count(&grid, h - 2, w - 2), 1);
        assert_eq!(live_neighbor_count(&grid, 2, 3), 0);
    }

    #[test]
    fn count_single_column_torus() {
        // Every horizontal offset of a one cell wide grid lands back on the same column
        let grid = grid_with(1, 4, &[(0, 0), (1, 0)]);

        assert_eq!(live_neighbor_count(&grid, 0, 0), 3);
        assert_eq!(live_neighbor_count(&grid, 1, 0), 3);
        assert_eq!(live_neighbor_count(&grid, 2, 0), 3);
    }

    #[test]
    fn count_never_wraps_onto_self() {
        let column = grid_with(1, 5, &[(2, 0)]);
        let row = grid_with(5, 1, &[(0, 2)]);
        let single = grid_with(1, 1, &[(0, 0)]);

        assert_eq!(live_neighbor_count(&column, 2, 0), 0);
        assert_eq!(live_neighbor_count(&row, 0, 2), 0);
        assert_eq!(live_neighbor_count(&single, 0, 0), 0);
    }

    #[test]
    fn lone_cell_on_thin_torus_dies() {
        for (w, h, alive) in [(1, 5, (2, 0)), (5, 1, (0, 2)), (1, 1, (0, 0))] {
            let grid = grid_with(w, h, &[alive]);
            let mut next = vec![Cell::Alive; grid.area()];

            step(&grid, &mut next);

            assert!(next.iter().all(|&cell| cell == Cell::Dead), "{w}x{h}");
        }
    }

    #[test]
    fn step_blinker() {
        let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let mut next = vec![Cell::Dead; grid.area()];

        step(&grid, &mut next);

        let want = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(next, want.raw_view().as_cells());
    }

    #[test]
    fn step_overwrites_stale_buffer() {
        let grid = grid_with(4, 4, &[]);
        let mut next = vec![Cell::Alive; grid.area()];

        step(&grid, &mut next);

        assert!(next.iter().all(|&cell| cell == Cell::Dead));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn step_wrong_length() {
        let grid = grid_with(4, 4, &[]);

        step(&grid, &mut [Cell::Dead; 15]);
    }
}
