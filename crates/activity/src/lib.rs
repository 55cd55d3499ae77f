//! Fitness activities as a piece-size source.
//!
//! Loads the cached activity list (a JSON array in the fitness service's own
//! format), keeps the runs, and turns each run's distance into a piece size
//! for [`run_tetris_core::Sequencer`]. The run itself rides along as the
//! request token so the display can show what drove the current piece.
//!
//! ```
//! use run_tetris_activity::{parse_activities, run_sequence};
//!
//! let json = r#"[{"id": 1, "name": "Long run", "distance": 18400.0,
//!                 "sport_type": "Run", "start_date": "2024-06-01T06:00:00Z"}]"#;
//! let requests = run_sequence(&parse_activities(json).unwrap());
//! assert_eq!(requests[0].size, 18);
//! assert_eq!(requests[0].token.name, "Long run");
//! ```

pub mod format;
pub mod record;
pub mod sequence;

pub use format::{format_elapsed, format_km, format_pace, format_start};
pub use record::{load_activities, parse_activities, Activity};
pub use sequence::{is_run, run_sequence, size_for_distance, RUN_SPORT_TYPES};
