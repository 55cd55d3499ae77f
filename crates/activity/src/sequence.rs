//! Run filter and the distance to piece-size policy.

use run_tetris_core::SizeRequest;
use run_tetris_types::{MAX_PIECE_CELLS, MIN_PIECE_CELLS};

use crate::record::Activity;

/// Sport types that count as runs
pub const RUN_SPORT_TYPES: [&str; 3] = ["Run", "TrailRun", "VirtualRun"];

pub fn is_run(activity: &Activity) -> bool {
    RUN_SPORT_TYPES.contains(&activity.sport_type.as_str())
}

/// Whole kilometers, clamped to 1..=42. Zero, negative and NaN distances give 1.
pub fn size_for_distance(meters: f64) -> u32 {
    let km = (meters / 1000.0).floor();
    if !(km >= f64::from(MIN_PIECE_CELLS)) {
        MIN_PIECE_CELLS
    } else if km >= f64::from(MAX_PIECE_CELLS) {
        MAX_PIECE_CELLS
    } else {
        km as u32
    }
}

/// Runs only, oldest first, each paired with its piece size.
///
/// Runs sharing a start time keep their input order.
pub fn run_sequence(activities: &[Activity]) -> Vec<SizeRequest<Activity>> {
    let mut runs: Vec<Activity> = activities.iter().filter(|a| is_run(a)).cloned().collect();
    runs.sort_by_key(|a| a.start_date);

    log::debug!(
        "run sequence: runs={} skipped={}",
        runs.len(),
        activities.len() - runs.len()
    );
    runs.into_iter()
        .map(|run| SizeRequest::new(size_for_distance(run.distance), run))
        .collect()
}
