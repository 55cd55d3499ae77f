//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management, and simulation logic.
//! It has no dependencies on UI, terminal, or file I/O, making it:
//!
//! - **Deterministic**: the same size requests (or seed) produce identical games
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: the terminal front end is just one consumer of snapshots
//!
//! # Module Structure
//!
//! - [`generator`]: compact snake-filled shapes and size-based colors for 1..=42 cells
//! - [`pieces`]: shapes, clockwise rotation, the classic catalog and random selection
//! - [`board`]: 20x30 board with collision checks, stamping and line clearing
//! - [`scoring`]: line-clear points, levels and drop intervals
//! - [`sequencer`]: cycles an external size-request list into pieces
//! - [`game_state`]: the state machine (start, pause, moves, rotation, drops, locks)
//! - [`snapshot`]: read-only views handed to the display layer
//! - [`rng`]: seeded LCG for random mode
//!
//! # Game Rules
//!
//! - **Sizes**: each piece has as many cells as its request asks for (clamped to 1..=42)
//! - **Rotation**: clockwise, in place, no wall kicks; colliding rotations are rejected
//! - **Hard drop**: the lock runs one scheduler turn later (see [`GameState::run_pending`])
//! - **Scoring**: 40/100/300/1200 points times (level + 1) for 1/2/3/4+ lines
//! - **Levels**: one level per 10 lines; gravity speeds up 50ms per level down to 100ms
//!
//! # Example
//!
//! ```
//! use run_tetris_core::{GameState, SizeRequest, Sequencer};
//! use run_tetris_types::GameAction;
//!
//! let requests = vec![SizeRequest::new(5, "5k tempo"), SizeRequest::new(12, "long run")];
//! let mut game = GameState::new(Sequencer::with_requests(requests, 1));
//! game.start();
//! assert_eq!(game.piece_size(), Some(5));
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//! game.run_pending();
//!
//! assert_eq!(game.board().occupied_count(), 5);
//! assert_eq!(game.token(), Some(&"long run"));
//! ```
//!
//! # Timing
//!
//! [`GameState::advance`] takes elapsed milliseconds and performs one
//! [`GameState::tick`] per elapsed drop interval. The interval starts at
//! 1000ms and is re-armed on spawn, rotation, pause toggles and restarts.

pub mod board;
pub mod game_state;
pub mod generator;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod sequencer;
pub mod snapshot;

pub use run_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{Deferred, GameState, LockEvent, Phase, Tetromino};
pub use pieces::{ClassicKind, Piece, PieceKey, Shape};
pub use rng::SimpleRng;
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score};
pub use sequencer::{Drawn, Sequencer, SizeRequest};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
