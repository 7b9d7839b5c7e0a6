use std::str::FromStr;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Dimension;
use crate::cell::Cell;
use crate::error::ConfigError;

const DEFAULT_DENSITY: f64 = 0.5;

/// Probability of a cell starting alive, always within `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(f64);

impl Density {
    pub fn new(p: f64) -> Result<Self, ConfigError> {
        if (0f64..=1f64).contains(&p) {
            Ok(Self(p))
        } else {
            Err(ConfigError::DensityOutOfRange(p))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(DEFAULT_DENSITY)
    }
}

/// How the first generation of a universe is filled in.
///
/// Parsed from `classic`, `alternating`, `empty` or `random[:density[:seed]]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Seed {
    /// Alive wherever the cell index is even or a multiple of 7
    #[default]
    Classic,

    /// Alive wherever the cell index is even
    Alternating,

    Empty,

    /// Each cell independently alive with probability `density`. The same `seed` always yields
    /// the same grid.
    Random { density: Density, seed: u64 },
}

impl Seed {
    /// An initializer for [`crate::grid::Grid::create`] on a grid `width` cells wide.
    pub fn initializer(
        &self,
        width: Dimension,
    ) -> impl FnMut(Dimension, Dimension) -> Cell + use<> {
        let seed = *self;

        let mut rng = match seed {
            Seed::Random { seed, .. } => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };

        move |row, column| {
            let i = row as usize * width as usize + column as usize;

            match seed {
                Seed::Classic => Cell::from(i % 2 == 0 || i % 7 == 0),
                Seed::Alternating => Cell::from(i % 2 == 0),
                Seed::Empty => Cell::Dead,
                Seed::Random { density, .. } => {
                    let alive = rng
                        .as_mut()
                        .is_some_and(|rng| rng.gen_bool(density.get()));

                    Cell::from(alive)
                }
            }
        }
    }
}

impl FromStr for Seed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');

        match parts.next().unwrap_or_default() {
            "classic" => Ok(Seed::Classic),
            "alternating" => Ok(Seed::Alternating),
            "empty" => Ok(Seed::Empty),
            "random" => {
                let density = match parts.next() {
                    Some(p) => Density::new(p.parse()?)?,
                    None => Density::default(),
                };

                let seed = match parts.next() {
                    Some(n) => n.parse().map_err(ConfigError::InvalidRandomSeed)?,
                    None => 0,
                };

                if parts.next().is_some() {
                    return Err(ConfigError::UnknownSeed(s.to_string()));
                }

                Ok(Seed::Random { density, seed })
            }
            _ => Err(ConfigError::UnknownSeed(s.to_string())),
        }
    }
}
