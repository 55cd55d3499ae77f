//! Run Tetris (workspace facade crate).
//!
//! A falling-block game whose piece sizes come from a run history: every run
//! becomes one piece with as many cells as whole kilometers run. The engine
//! and the front end live in dedicated crates under `crates/`; this package
//! re-exports them under stable names and holds the binary's configuration
//! and logging setup.

pub mod config;
pub mod logging;

pub use run_tetris_activity as activity;
pub use run_tetris_core as core;
pub use run_tetris_input as input;
pub use run_tetris_term as term;
pub use run_tetris_types as types;
