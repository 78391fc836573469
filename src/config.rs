use std::time::Duration;

use thiserror::Error;

use crate::{Coords, TermInt};

pub const DEFAULT_HEIGHT: TermInt = 20;
pub const DEFAULT_WIDTH: TermInt = 40;
pub const DEFAULT_TICK_MS: u64 = 100;

pub const INITIAL_SNAKE_LENGTH: TermInt = 3;

/// Smallest grid that still keeps the starting snake off the border.
pub const MIN_HEIGHT: TermInt = 5;
pub const MIN_WIDTH: TermInt = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid height {height} is too small, need at least {min} rows")]
    HeightTooSmall { height: TermInt, min: TermInt },
    #[error("grid width {width} is too small, need at least {min} columns")]
    WidthTooSmall { width: TermInt, min: TermInt },
}

/// Grid size and pacing, fixed for a whole session.
///
/// The border ring is part of the grid, so the playable interior is
/// `1..height-1` by `1..width-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    height: TermInt,
    width: TermInt,
    tick_interval: Duration,
}

impl Config {
    pub fn new(height: TermInt, width: TermInt, tick_interval: Duration) -> Result<Self, ConfigError> {
        if height < MIN_HEIGHT {
            return Err(ConfigError::HeightTooSmall { height, min: MIN_HEIGHT });
        }
        if width < MIN_WIDTH {
            return Err(ConfigError::WidthTooSmall { width, min: MIN_WIDTH });
        }

        Ok(Config { height, width, tick_interval })
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Where the head of a fresh snake goes.
    pub fn start_head(&self) -> Coords {
        (self.height / 2, self.width / 2)
    }

    pub fn is_interior(&self, (row, col): Coords) -> bool {
        row > 0 && col > 0 && row < self.height - 1 && col < self.width - 1
    }

    /// Every interior cell, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Coords> {
        let (height, width) = (self.height, self.width);
        (1..height - 1).flat_map(move |row| (1..width - 1).map(move |col| (row, col)))
    }

    /// Terminal rows and columns needed to show the grid plus the status line.
    pub fn required_viewport(&self) -> (TermInt, TermInt) {
        (self.height.saturating_add(1), self.width)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_grids_below_minimum() {
        assert_eq!(
            Config::new(4, 20, Duration::ZERO),
            Err(ConfigError::HeightTooSmall { height: 4, min: MIN_HEIGHT })
        );
        assert_eq!(
            Config::new(10, 5, Duration::ZERO),
            Err(ConfigError::WidthTooSmall { width: 5, min: MIN_WIDTH })
        );
    }

    #[test]
    fn smallest_grid_fits_starting_snake() {
        let config = Config::new(MIN_HEIGHT, MIN_WIDTH, Duration::ZERO).unwrap();
        let (row, col) = config.start_head();

        for i in 0..INITIAL_SNAKE_LENGTH {
            assert!(config.is_interior((row, col - i)), "segment {} on the border", i);
        }
    }

    #[test]
    fn interior_excludes_border() {
        let config = Config::new(5, 6, Duration::ZERO).unwrap();
        let cells: Vec<Coords> = config.interior().collect();

        assert_eq!(cells.len(), 3 * 4);
        assert_eq!(cells.first(), Some(&(1, 1)));
        assert_eq!(cells.last(), Some(&(3, 4)));
        assert!(cells.iter().all(|&pos| config.is_interior(pos)));
        assert!(!config.is_interior((0, 2)));
        assert!(!config.is_interior((2, 5)));
    }

    #[test]
    fn viewport_reserves_status_line() {
        let config = Config::default();
        assert_eq!(config.required_viewport(), (DEFAULT_HEIGHT + 1, DEFAULT_WIDTH));
    }
}
