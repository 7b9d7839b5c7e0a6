use std::time::Duration;

use crate::Dimension;
use crate::error::ConfigError;
use crate::seed::Seed;
use crate::universe::DEFAULT_HEIGHT;
use crate::universe::DEFAULT_WIDTH;

const DEFAULT_FRAME_RATE: u32 = 30;

/// Everything the `torus-life` binary can be told on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: Dimension,
    pub height: Dimension,
    pub seed: Seed,

    /// Frames per second
    pub frame_rate: u32,

    /// Stop after this many generations. Runs until interrupted when `None`.
    pub generations: Option<u64>,

    /// Side length of a cell, in braille pixels
    pub cell_size: usize,
    pub gridlines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: Seed::default(),
            frame_rate: DEFAULT_FRAME_RATE,
            generations: None,
            cell_size: 1,
            gridlines: false,
        }
    }
}

impl Config {
    /// Parse arguments, not including the program name.
    ///
    /// ```notrust
    /// --width N  --height N  --seed SEED  --fps N  --generations N  --cell-size N  --gridlines
    /// ```
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => config.width = number("--width", args.next())?,
                "--height" => config.height = number("--height", args.next())?,
                "--fps" => config.frame_rate = number("--fps", args.next())?,
                "--generations" => {
                    config.generations = Some(number("--generations", args.next())?)
                }
                "--cell-size" => config.cell_size = number("--cell-size", args.next())?,
                "--seed" => {
                    let seed = args.next().ok_or(ConfigError::MissingValue("--seed"))?;
                    config.seed = seed.parse()?;
                }
                "--gridlines" => config.gridlines = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        if config.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        if config.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        Ok(config)
    }

    /// Time between the start of two frames
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

fn number<T>(flag: &'static str, value: Option<String>) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let value = value.ok_or(ConfigError::MissingValue(flag))?;

    value
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { flag, source })
}
