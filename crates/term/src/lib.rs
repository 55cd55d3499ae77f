//! Terminal "game renderer".
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout frameworks and instead renders into a simple framebuffer that
//! is flushed to the terminal as a diff against the previous frame.
//!
//! - [`GameView`] turns a [`core::GameSnapshot`] into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] writes frames through crossterm
//! - Board cells are drawn 2 columns wide to keep them roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use run_tetris_activity as activity;
pub use run_tetris_core as core;
pub use run_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
