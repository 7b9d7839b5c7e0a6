use std::num::ParseFloatError;
use std::num::ParseIntError;

use thiserror::Error;

pub type UniverseResult<T> = Result<T, UniverseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UniverseError {
    #[error("Invalid dimensions {width}x{height}, both must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cell ({row}, {column}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        row: u32,
        column: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown argument \"{0}\"")]
    UnknownArgument(String),

    #[error("Argument \"{0}\" requires a value")]
    MissingValue(&'static str),

    #[error("Invalid value for \"{flag}\": {source}")]
    InvalidNumber {
        flag: &'static str,
        source: ParseIntError,
    },

    #[error("Invalid density: {0}")]
    InvalidDensity(#[from] ParseFloatError),

    #[error("Density {0} is outside of [0, 1]")]
    DensityOutOfRange(f64),

    #[error("Unknown seed \"{0}\", expected classic, alternating, empty or random[:density[:seed]]")]
    UnknownSeed(String),

    #[error("Invalid random seed: {0}")]
    InvalidRandomSeed(ParseIntError),

    #[error("Frame rate must be non-zero")]
    ZeroFrameRate,

    #[error("Cell size must be non-zero")]
    ZeroCellSize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Canvas is laid out for a {expected_width}x{expected_height} grid, got {width}x{height}")]
    GridMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
}
