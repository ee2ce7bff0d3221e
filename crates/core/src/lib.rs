//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of 3D 2048: the cube grid, tiles, bonus
//! bookkeeping and the move/merge engine. It has no dependencies on the
//! terminal, files or the clock:
//!
//! - **Deterministic**: the random source is injected, so a seed replays a game
//! - **Testable**: collaborators (best-score store, observer) are traits
//! - **Portable**: any front end can drive it through [`GameEngine`]
//!
//! # Module Structure
//!
//! - [`grid`]: `size³` cube of optional tiles
//! - [`tile`]: tile value, kind and per-move history
//! - [`bonus`]: per-value counters for bonus tiles in play
//! - [`game_engine`]: moves, merges, spawns, win/over detection
//! - [`snapshot`]: read-only views pushed to the presentation
//! - [`score`]: best-score persistence seam
//! - [`config`]: tunables and their environment overrides
//!
//! # Game Rules
//!
//! - Tiles slide as far as possible along one of six axis directions
//! - Two tiles of equal value *and kind* merge once per move
//! - After a move that changed anything, a 2 (90%) or 4 spawns, then maybe a
//!   bonus tile, capped per value and in total
//! - Reaching the win value with a normal tile wins; the player may continue
//! - With no empty cell and no adjacent equal pair the game is over
//!
//! # Example
//!
//! ```
//! use tui_cube2048_core::{GameConfig, GameEngine};
//! use tui_cube2048_types::Direction;
//!
//! let mut game = GameEngine::new(GameConfig::default(), 12345).unwrap();
//! game.setup();
//! assert_eq!(game.grid().occupied_count(), 2);
//!
//! game.move_tiles(Direction::Left);
//! game.move_tiles(Direction::Front);
//! assert!(game.snapshot().tiles().count() >= 2);
//! ```

pub mod bonus;
pub mod config;
pub mod error;
pub mod game_engine;
pub mod grid;
pub mod score;
pub mod snapshot;
pub mod tile;

pub use tui_cube2048_types as types;

// Re-export commonly used types for convenience
pub use bonus::BonusCounters;
pub use config::{BonusConfig, GameConfig};
pub use error::{ConfigError, GameError, GridError};
pub use game_engine::{GameEngine, GameState, MoveOutcome};
pub use grid::Grid;
pub use score::{BestScoreStore, MemoryScoreStore};
pub use snapshot::{ChannelObserver, GameObserver, GameSnapshot, TileView};
pub use tile::Tile;
