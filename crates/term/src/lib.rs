//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the cube. It avoids widget
//! toolkits and renders into a plain framebuffer that is flushed to the
//! terminal by [`TerminalRenderer`].
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot → framebuffer (pure, testable)
//! - [`renderer`]: framebuffer → terminal, row diffed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_cube2048_core as core;
pub use tui_cube2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_label, tile_style, AnchorY, GameView, ViewOptions, Viewport};
pub use renderer::{changed_rows, encode_full_into, encode_rows_into, TerminalRenderer};
