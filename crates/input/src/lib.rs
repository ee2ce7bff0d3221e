//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`InputCommand`]s. Nothing here touches
//! the engine; the run loop decides what each command does.

pub mod map;

pub use tui_cube2048_types as types;

pub use map::{map_key, should_quit, InputCommand};
