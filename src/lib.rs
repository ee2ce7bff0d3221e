//! 3D 2048 in the terminal (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_cube2048::{core,input,term,types}` and adds the
//! pieces that only the binary needs: a file-backed best score, logging
//! setup, and the application context that wires input to the engine.

pub mod app;
pub mod best_score;
pub mod logging;

pub use tui_cube2048_core as core;
pub use tui_cube2048_input as input;
pub use tui_cube2048_term as term;
pub use tui_cube2048_types as types;
