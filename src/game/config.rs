use anyhow::{ensure, Result};
use serde::Serialize;

use super::state::Position;

/// Smallest board that still leaves an interior inside the border ring
pub const MIN_DIMENSION: usize = 5;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    /// Width of the board, border columns included
    pub dim_x: usize,
    /// Height of the board, border rows included
    pub dim_y: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { dim_x: 20, dim_y: 10 }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(dim_x: usize, dim_y: usize) -> Self {
        Self { dim_x, dim_y }
    }

    /// Smallest playable board
    pub fn small() -> Self {
        Self::new(MIN_DIMENSION, MIN_DIMENSION)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.dim_x >= MIN_DIMENSION && self.dim_y >= MIN_DIMENSION,
            "board must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {}x{}",
            self.dim_x,
            self.dim_y
        );
        ensure!(
            self.dim_x <= i32::MAX as usize && self.dim_y <= i32::MAX as usize,
            "board {}x{} is too large",
            self.dim_x,
            self.dim_y
        );
        ensure!(
            self.dim_x.checked_mul(self.dim_y).is_some(),
            "board {}x{} has more cells than this platform can address",
            self.dim_x,
            self.dim_y
        );
        Ok(())
    }

    /// Ticks allowed between two meals before the snake starves
    pub fn max_steps_without_eating(&self) -> u64 {
        self.dim_x as u64 * self.dim_y as u64
    }

    /// Cell the snake starts on: second-to-last row, middle column
    pub fn start_position(&self) -> Position {
        Position::new(self.dim_y as i32 - 2, (self.dim_x / 2) as i32)
    }

    /// True if the cell lies on (or beyond) the border ring
    pub fn is_border(&self, pos: Position) -> bool {
        pos.row <= 0
            || pos.col <= 0
            || pos.row >= self.dim_y as i32 - 1
            || pos.col >= self.dim_x as i32 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.dim_x, 20);
        assert_eq!(config.dim_y, 10);
        assert_eq!(config.max_steps_without_eating(), 200);
        assert_eq!(config.start_position(), Position::new(8, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_too_small_board_is_rejected() {
        assert!(GameConfig::new(4, 10).validate().is_err());
        assert!(GameConfig::new(10, 4).validate().is_err());
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_starvation_bound_covers_every_cell() {
        let config = GameConfig::new(65536, 65536);
        assert!(config.validate().is_ok());
        assert_eq!(config.max_steps_without_eating(), 1 << 32);

        let widest = GameConfig::new(i32::MAX as usize, i32::MAX as usize);
        assert_eq!(
            widest.max_steps_without_eating(),
            (i32::MAX as u64) * (i32::MAX as u64)
        );
    }

    #[test]
    fn test_border_ring() {
        let config = GameConfig::default();
        assert!(config.is_border(Position::new(0, 5)));
        assert!(config.is_border(Position::new(5, 0)));
        assert!(config.is_border(Position::new(9, 5)));
        assert!(config.is_border(Position::new(5, 19)));
        assert!(config.is_border(Position::new(-1, 5)));
        assert!(!config.is_border(Position::new(1, 1)));
        assert!(!config.is_border(Position::new(8, 18)));
    }
}
