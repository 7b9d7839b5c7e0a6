pub mod cell;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod render;
pub mod seed;
pub mod universe;

pub use cell::Cell;
pub use grid::CellView;
pub use universe::Universe;

/// Width and height of a grid, and row and column coordinates within one
pub type Dimension = u32;
