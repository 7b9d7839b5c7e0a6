use std::mem;

use tracing::debug;

use crate::Dimension;
use crate::cell::Cell;
use crate::error::UniverseError;
use crate::error::UniverseResult;

/// A `width x height` rectangle of cells, stored contiguously in row-major order.
///
/// Cells can only be written at construction, and by the engine swapping in a whole new
/// generation. Everyone else gets a [`CellView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: Dimension,
    height: Dimension,

    /// Always exactly `width * height` long
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where the cell at `(row, column)` is `initializer(row, column)`.
    ///
    /// The initializer is called exactly once per position, in row-major order.
    pub fn create<F>(
        width: Dimension,
        height: Dimension,
        mut initializer: F,
    ) -> UniverseResult<Self>
    where
        F: FnMut(Dimension, Dimension) -> Cell,
    {
        let area = Self::checked_area(width, height)?;

        let mut cells = Vec::with_capacity(area);
        for row in 0..height {
            for column in 0..width {
                cells.push(initializer(row, column));
            }
        }

        debug!(width, height, "created grid");

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of cells for the given dimensions, rejecting empty or unaddressable grids.
    pub(crate) fn checked_area(width: Dimension, height: Dimension) -> UniverseResult<usize> {
        let invalid = UniverseError::InvalidDimensions { width, height };

        if width == 0 || height == 0 {
            return Err(invalid);
        }

        (width as usize).checked_mul(height as usize).ok_or(invalid)
    }

    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn height(&self) -> Dimension {
        self.height
    }

    /// Number of cells, `width * height`
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// The cell at `(row, column)`. Coordinates are not wrapped.
    pub fn get(&self, row: Dimension, column: Dimension) -> UniverseResult<Cell> {
        if row >= self.height || column >= self.width {
            return Err(UniverseError::OutOfBounds {
                row,
                column,
                width: self.width,
                height: self.height,
            });
        }

        Ok(self.cell(row, column))
    }

    /// Unchecked access for the engine, which only ever asks for in-range positions.
    #[inline]
    pub(crate) fn cell(&self, row: Dimension, column: Dimension) -> Cell {
        self.cells[self.index(row, column)]
    }

    #[inline]
    pub(crate) fn index(&self, row: Dimension, column: Dimension) -> usize {
        row as usize * self.width as usize + column as usize
    }

    /// Borrow the cell buffer. The view lives as long as the borrow of the grid, so it can never
    /// observe a swapped-out generation.
    pub fn raw_view(&self) -> CellView<'_> {
        CellView {
            width: self.width,
            height: self.height,
            cells: &self.cells,
        }
    }

    /// Swap `next` in as the current generation. The previous generation ends up in `next`.
    ///
    /// # Panics
    ///
    /// If `next` is not exactly as long as the grid. This is a defect in the caller, and the
    /// current generation is left untouched.
    pub(crate) fn swap_cells(&mut self, next: &mut Vec<Cell>) {
        assert_eq!(
            next.len(),
            self.cells.len(),
            "next generation does not match a {}x{} grid",
            self.width,
            self.height
        );

        mem::swap(&mut self.cells, next);
    }
}

/// Read-only, zero-copy view over a grid's cells in row-major order.
///
/// Byte `row * width + column` of [`CellView::as_bytes`] is the cell at `(row, column)`, `0`
/// meaning dead and anything else alive.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    width: Dimension,
    height: Dimension,
    cells: &'a [Cell],
}

impl<'a> CellView<'a> {
    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn height(&self) -> Dimension {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_cells(&self) -> &'a [Cell] {
        self.cells
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.cells)
    }

    /// Pointer to the first byte, for readers across an FFI boundary. It is only valid while this
    /// view is.
    pub fn as_ptr(&self) -> *const u8 {
        self.as_bytes().as_ptr()
    }

    /// One slice per row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> + use<'a> {
        self.cells.chunks(self.width as usize)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }
}
