//! Game configuration.
//!
//! [`GameConfig::default`] is the shipped 3×3×3 variant. Every field can be
//! overridden from the environment with [`GameConfig::from_env`]:
//!
//! - `CUBE2048_SIZE`: edge length of the cube (default: 3)
//! - `CUBE2048_WIN_VALUE`: tile value that wins the game (default: 2048)
//! - `CUBE2048_RETIRE_MERGED_BONUS`: "1"/"true" removes merged-bonus tiles
//!   when the next move begins (default: off)
//!
//! Unparseable values fall back to the defaults.

use crate::error::ConfigError;
use crate::types::{
    BONUS_PER_VALUE_CAP, BONUS_SPAWN_RATE, BONUS_TOTAL_CAP, BONUS_VALUES, DEFAULT_SIZE,
    MAX_BONUS_VALUES, MAX_SIZE, START_TILES, TWO_PROBABILITY, WIN_VALUE,
};

/// Bonus tile spawning rules.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusConfig {
    /// Candidate values, picked uniformly.
    pub values: Vec<u32>,
    pub per_value_cap: u8,
    pub total_cap: u8,
    /// Spawn chance per move is `spawn_rate * free_cells / size³`.
    pub spawn_rate: f64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            values: BONUS_VALUES.to_vec(),
            per_value_cap: BONUS_PER_VALUE_CAP,
            total_cap: BONUS_TOTAL_CAP,
            spawn_rate: BONUS_SPAWN_RATE,
        }
    }
}

impl BonusConfig {
    /// No bonus tiles at all.
    pub fn disabled() -> Self {
        Self {
            spawn_rate: 0.0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub start_tiles: usize,
    pub win_value: u32,
    /// Chance that a random spawn is a 2 rather than a 4.
    pub two_probability: f64,
    pub bonus: BonusConfig,
    /// Remove merged-bonus tiles when the next move begins.
    pub retire_merged_bonus: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start_tiles: START_TILES,
            win_value: WIN_VALUE,
            two_probability: TWO_PROBABILITY,
            bonus: BonusConfig::default(),
            retire_merged_bonus: false,
        }
    }
}

impl GameConfig {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let size = env::var("CUBE2048_SIZE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.size);

        let win_value = env::var("CUBE2048_WIN_VALUE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.win_value);

        let retire_merged_bonus = env::var("CUBE2048_RETIRE_MERGED_BONUS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.retire_merged_bonus);

        Self {
            size,
            win_value,
            retire_merged_bonus,
            ..defaults
        }
    }

    /// Number of cells in the cube.
    pub fn capacity(&self) -> usize {
        self.size * self.size * self.size
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::Size(self.size));
        }
        if self.win_value <= 2 || !self.win_value.is_power_of_two() {
            return Err(ConfigError::WinValue(self.win_value));
        }
        if self.start_tiles > self.capacity() {
            return Err(ConfigError::StartTiles {
                start: self.start_tiles,
                capacity: self.capacity(),
            });
        }
        for p in [self.two_probability, self.bonus.spawn_rate] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Probability(p));
            }
        }
        if self.bonus.values.len() > MAX_BONUS_VALUES {
            return Err(ConfigError::TooManyBonusValues(self.bonus.values.len()));
        }
        if let Some(&v) = self.bonus.values.iter().find(|v| !v.is_power_of_two()) {
            return Err(ConfigError::BonusValue(v));
        }
        Ok(())
    }
}
