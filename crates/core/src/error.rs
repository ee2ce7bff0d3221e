//! Error types for precondition violations.
//!
//! Gameplay itself never errors: an illegal move is a silent no-op. These
//! errors describe calling mistakes (bad direction codes, out-of-bounds
//! access, asking a full grid for a free cell) and invalid configuration.

use thiserror::Error;
use tui_cube2048_types::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({}, {}, {}) is outside a grid of size {size}", .pos.x, .pos.y, .pos.z)]
    OutOfBounds { pos: Position, size: usize },
    #[error("no available cell on a full grid")]
    NoAvailableCell,
    #[error("position ({}, {}, {}) is already occupied", .pos.x, .pos.y, .pos.z)]
    Occupied { pos: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid direction code {0} (expected 0..=5)")]
    InvalidDirection(u8),
    #[error("tile value {0} is not a power of two of at least 2")]
    TileValue(u32),
    #[error("bonus tile {value} exceeds the bonus caps")]
    BonusCap { value: u32 },
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is out of range (2..={max})", max = tui_cube2048_types::MAX_SIZE)]
    Size(usize),
    #[error("win value {0} is not a power of two greater than 2")]
    WinValue(u32),
    #[error("bonus value {0} is not a power of two")]
    BonusValue(u32),
    #[error("too many bonus values: {0}")]
    TooManyBonusValues(usize),
    #[error("probability {0} is outside [0, 1]")]
    Probability(f64),
    #[error("start tiles {start} exceed grid capacity {capacity}")]
    StartTiles { start: usize, capacity: usize },
}
