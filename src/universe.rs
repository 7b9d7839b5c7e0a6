use std::fmt;

use tracing::debug;
use tracing::trace;

use crate::Dimension;
use crate::cell::Cell;
use crate::engine;
use crate::error::UniverseResult;
use crate::grid::CellView;
use crate::grid::Grid;
use crate::seed::Seed;

pub const DEFAULT_WIDTH: Dimension = 64;
pub const DEFAULT_HEIGHT: Dimension = 64;

/// A Game of Life on a `width x height` torus.
///
/// Two buffers of the same size are allocated up front. [`Universe::tick`] writes the next
/// generation into the back buffer and then swaps it in, so no generation is ever partially
/// visible and nothing is allocated after construction.
pub struct Universe {
    /// The current generation
    grid: Grid,

    /// Where the next generation is computed. Holds the previous generation between ticks.
    next: Vec<Cell>,

    /// Number of ticks since construction
    generation: u64,
}

impl Universe {
    /// A `64x64` universe filled with [`Seed::Classic`]
    pub fn new() -> Self {
        let Ok(universe) = Self::seeded(DEFAULT_WIDTH, DEFAULT_HEIGHT, &Seed::Classic) else {
            unreachable!("the default dimensions are non-zero")
        };

        universe
    }

    /// Create a universe where the cell at `(row, column)` starts as `initializer(row, column)`.
    pub fn create<F>(width: Dimension, height: Dimension, initializer: F) -> UniverseResult<Self>
    where
        F: FnMut(Dimension, Dimension) -> Cell,
    {
        let grid = Grid::create(width, height, initializer)?;
        let next = vec![Cell::Dead; grid.area()];

        debug!(
            width,
            height,
            live = grid.raw_view().live_count(),
            "created universe"
        );

        Ok(Self {
            grid,
            next,
            generation: 0,
        })
    }

    pub fn seeded(width: Dimension, height: Dimension, seed: &Seed) -> UniverseResult<Self> {
        Self::create(width, height, seed.initializer(width))
    }

    pub fn width(&self) -> Dimension {
        self.grid.width()
    }

    pub fn height(&self) -> Dimension {
        self.grid.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, row: Dimension, column: Dimension) -> UniverseResult<Cell> {
        self.grid.get(row, column)
    }

    /// Live neighbors of an in-bounds cell, wrapping around the edges of the universe.
    pub fn live_neighbor_count(&self, row: Dimension, column: Dimension) -> UniverseResult<u8> {
        self.grid.get(row, column)?;

        Ok(engine::live_neighbor_count(&self.grid, row, column))
    }

    /// Advance the universe by one generation.
    pub fn tick(&mut self) {
        engine::step(&self.grid, &mut self.next);
        self.grid.swap_cells(&mut self.next);

        self.generation += 1;

        trace!(generation = self.generation, "tick");
    }

    /// The current generation, one byte per cell in row-major order.
    ///
    /// The view borrows the universe, so it has to be dropped before the next [`Universe::tick`].
    pub fn cells(&self) -> CellView<'_> {
        self.grid.raw_view()
    }

    /// Text rendering of the current generation, one line per row
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.cells().rows() {
            for &cell in line {
                write!(f, "{}", cell.symbol())?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Universe;
    use crate::cell::Cell;
    use crate::error::UniverseError;

    fn glider() -> Universe {
        let alive = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

        Universe::create(5, 5, |row, column| Cell::from(alive.contains(&(row, column)))).unwrap()
    }

    #[test]
    fn default_universe() {
        let universe = Universe::new();

        assert_eq!(universe.width(), 64);
        assert_eq!(universe.height(), 64);
        assert_eq!(universe.generation(), 0);
        assert_eq!(universe.cells().len(), 64 * 64);
        assert_eq!(universe.get(0, 7), Ok(Cell::Alive));
        assert_eq!(universe.get(0, 9), Ok(Cell::Dead));
    }

    #[test]
    fn tick_counts_generations() {
        let mut universe = glider();

        for _ in 0..3 {
            universe.tick();
        }

        assert_eq!(universe.generation(), 3);
    }

    #[test]
    fn tick_reuses_buffers() {
        let mut universe = glider();
        let first = universe.cells().as_ptr();

        universe.tick();
        let second = universe.cells().as_ptr();

        universe.tick();
        let third = universe.cells().as_ptr();

        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn neighbor_count_is_bounds_checked() {
        let universe = glider();

        assert_eq!(universe.live_neighbor_count(1, 1), Ok(5));
        assert!(matches!(
            universe.live_neighbor_count(5, 0),
            Err(UniverseError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn render_glider() {
        let mut universe = glider();

        insta::assert_snapshot!(universe.render(), @r"
        ◻◼◻◻◻
        ◻◻◼◻◻
        ◼◼◼◻◻
        ◻◻◻◻◻
        ◻◻◻◻◻
        ");

        universe.tick();

        insta::assert_snapshot!(universe.render(), @r"
        ◻◻◻◻◻
        ◼◻◼◻◻
        ◻◼◼◻◻
        ◻◼◻◻◻
        ◻◻◻◻◻
        ");
    }
}
