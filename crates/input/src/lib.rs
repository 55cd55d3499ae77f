//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key
//! press is one discrete command; there is no auto-repeat handling beyond what
//! the terminal itself delivers.

pub mod map;

pub use run_tetris_types as types;

pub use map::{handle_key_event, is_press, should_quit};
