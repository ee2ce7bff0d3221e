//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic attached, so they can be shared
//! between the engine, the terminal view and the key map.
//!
//! # Coordinates
//!
//! The playfield is a cube of `size × size × size` cells:
//!
//! - **x**: left to right
//! - **y**: top to bottom
//! - **z**: back to front (toward the viewer)
//!
//! # Directions
//!
//! Six symbolic directions map to unit vectors. A "rotated" camera remaps the
//! horizontal directions onto the other two axes:
//!
//! | Code | Direction | Vector | Rotated vector |
//! |------|-----------|--------|----------------|
//! | 0 | Up | (0,-1,0) | (0,-1,0) |
//! | 1 | Right | (1,0,0) | (0,0,1) |
//! | 2 | Down | (0,1,0) | (0,1,0) |
//! | 3 | Left | (-1,0,0) | (0,0,-1) |
//! | 4 | Front | (0,0,1) | (-1,0,0) |
//! | 5 | Back | (0,0,-1) | (1,0,0) |
//!
//! # Examples
//!
//! ```
//! use tui_cube2048_types::{Direction, Position, Vector};
//!
//! let right = Direction::from_code(1).unwrap();
//! assert_eq!(right.vector(false), Vector::new(1, 0, 0));
//! assert_eq!(right.vector(true), Vector::new(0, 0, 1));
//!
//! let p = Position::new(0, 0, 0).step(right.vector(false));
//! assert_eq!(p, Position::new(1, 0, 0));
//! ```

use serde::{Deserialize, Serialize};

/// Edge length of the shipped cube.
pub const DEFAULT_SIZE: usize = 3;

/// Largest supported edge length.
pub const MAX_SIZE: usize = 16;

/// Number of tiles placed when a game starts.
pub const START_TILES: usize = 2;

/// Value of the winning tile.
pub const WIN_VALUE: u32 = 2048;

/// Probability that a random spawn is a 2 (otherwise a 4).
pub const TWO_PROBABILITY: f64 = 0.9;

/// Values a bonus tile can take.
pub const BONUS_VALUES: [u32; 3] = [4, 64, 256];

/// Maximum bonus tiles of one value in play at once.
pub const BONUS_PER_VALUE_CAP: u8 = 2;

/// Maximum bonus tiles in play at once.
pub const BONUS_TOTAL_CAP: u8 = 4;

/// Scales the bonus spawn chance: `rate * free_cells / size³`.
pub const BONUS_SPAWN_RATE: f64 = 0.2;

/// Maximum number of distinct bonus values.
pub const MAX_BONUS_VALUES: usize = 8;

/// Tile values above this are labelled as powers (`2^k`).
pub const LABEL_POWER_THRESHOLD: u32 = 8192;


/// A cell coordinate. Components may step one cell outside the grid while
/// walking toward a wall; the grid decides what is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighbouring position one step along `v`.
    #[inline]
    pub fn step(self, v: Vector) -> Self {
        Self {
            x: self.x + v.dx,
            y: self.y + v.dy,
            z: self.z + v.dz,
        }
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// A unit step along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

impl Vector {
    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }

    /// The three positive axis steps. Scanning these from every cell visits
    /// each adjacent pair of the 6-neighbourhood exactly once.
    pub const POSITIVE_AXES: [Vector; 3] = [
        Vector::new(1, 0, 0),
        Vector::new(0, 1, 0),
        Vector::new(0, 0, 1),
    ];
}

/// The six symbolic move directions, numbered as the input layer sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
    Front = 4,
    Back = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Front,
        Direction::Back,
    ];

    /// Parse a numeric direction code (0..=5).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Unit vector for this direction under the given camera.
    pub fn vector(self, rotated: bool) -> Vector {
        match (self, rotated) {
            (Direction::Up, _) => Vector::new(0, -1, 0),
            (Direction::Down, _) => Vector::new(0, 1, 0),
            (Direction::Right, false) => Vector::new(1, 0, 0),
            (Direction::Left, false) => Vector::new(-1, 0, 0),
            (Direction::Front, false) => Vector::new(0, 0, 1),
            (Direction::Back, false) => Vector::new(0, 0, -1),
            (Direction::Right, true) => Vector::new(0, 0, 1),
            (Direction::Left, true) => Vector::new(0, 0, -1),
            (Direction::Front, true) => Vector::new(-1, 0, 0),
            (Direction::Back, true) => Vector::new(1, 0, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Front => "front",
            Direction::Back => "back",
        }
    }
}

/// Tile variety.
///
/// - **Normal**: ordinary spawn or merge of normals
/// - **Bonus**: scarce special spawn, counted against the bonus caps
/// - **MergedBonus**: result of merging two bonus-family tiles
///
/// Tiles only merge with tiles of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    #[default]
    Normal,
    Bonus,
    MergedBonus,
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Normal => "normal",
            TileKind::Bonus => "bonus",
            TileKind::MergedBonus => "merged-bonus",
        }
    }

    pub fn is_bonus_family(&self) -> bool {
        !matches!(self, TileKind::Normal)
    }
}
