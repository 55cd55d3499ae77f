//! Scoring module - classic line-clear scoring, levels and gravity
//!
//! - One lock clearing N rows scores `LINE_SCORES[N] * (level + 1)`, using
//!   the level in force before the lock.
//! - Tall pieces can clear more than four rows at once; those score the
//!   four-row amount.
//! - Level is `lines / 10 + 1`, so a fresh game starts at level 1.
//! - Each level above 1 takes 50ms off the drop interval, down to 100ms.

use crate::types::{
    DROP_DECREMENT_MS, INITIAL_DROP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS,
};

/// Calculate line clear score
/// lines: number of rows removed by a single lock
/// level: level before the lock (1-based)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level.saturating_add(1))
}

/// Level for a cumulative line count
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    INITIAL_DROP_MS
        .saturating_sub(steps.saturating_mul(DROP_DECREMENT_MS))
        .max(MIN_DROP_MS)
}
