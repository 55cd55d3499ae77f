//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, activity loading).
//!
//! # Board Dimensions
//!
//! The playfield is wider and taller than a classic one so that large
//! run-sized pieces still fit:
//!
//! - **Width**: 20 columns (indexed 0-19)
//! - **Height**: 30 rows (indexed 0-29)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Drop Interval
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 1000 | Gravity at level 1 |
//! | `DROP_DECREMENT_MS` | 50 | Interval shaved off per level above 1 |
//! | `MIN_DROP_MS` | 100 | Fastest gravity |
//! | `TICK_MS` | 16 | Frame step of the terminal loop (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use run_tetris_types::{Color, GameAction, Position, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};
//!
//! let color = Color::new(221, 60, 60);
//! assert_eq!(color.to_string(), "#dd3c3c");
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//!
//! assert_eq!(SPAWN_POSITION, Position::new(3, 0));
//! assert_eq!(BOARD_WIDTH, 20);
//! assert_eq!(BOARD_HEIGHT, 30);
//! ```

use std::fmt;

/// Board width in cells (20 columns)
pub const BOARD_WIDTH: u8 = 20;

/// Board height in cells (30 rows)
pub const BOARD_HEIGHT: u8 = 30;

/// Where every freshly spawned piece puts its top-left shape corner.
pub const SPAWN_POSITION: Position = Position { x: 3, y: 0 };

/// Fixed frame step for the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval at level 1 (1000ms = 1 second per row)
pub const INITIAL_DROP_MS: u32 = 1000;

/// Interval reduction per level above 1
pub const DROP_DECREMENT_MS: u32 = 50;

/// Fastest drop interval
pub const MIN_DROP_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Smallest piece size the engine accepts (requests below are clamped up)
pub const MIN_PIECE_CELLS: u32 = 1;

/// Largest piece size the engine accepts (a marathon, in kilometres)
pub const MAX_PIECE_CELLS: u32 = 42;

/// Largest bounding-box edge of any piece shape
pub const MAX_SHAPE_DIM: u8 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines in a single lock:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Board-space offset of a piece shape's top-left corner.
///
/// Coordinates grow right (`x`) and down (`y`). Values may be negative or past
/// the board edge while a candidate move is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Return this position shifted by `(dx, dy)`.
    ///
    /// ```
    /// use run_tetris_types::Position;
    ///
    /// assert_eq!(Position::new(3, 0).offset(-1, 0), Position::new(2, 0));
    /// assert_eq!(Position::new(3, 0).offset(0, 1), Position::new(3, 1));
    /// ```
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// 24-bit display color of a piece.
///
/// Rendered as a lowercase `#rrggbb` hex string by [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied cell, painted with the color of the piece that locked there
///
/// Using `Option` makes "a color is present iff the cell is occupied" hold by construction.
pub type Cell = Option<Color>;

/// Commands accepted by the game state machine
///
/// These are produced by the key map and consumed by
/// `GameState::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (no lock when blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise in place
    Rotate,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Start a new game (from any state)
    Start,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
        }
    }
}
