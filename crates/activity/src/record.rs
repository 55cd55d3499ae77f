//! Activity records as the fitness service returns them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded activity. Distances are meters, times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub name: String,
    pub distance: f64,
    #[serde(default)]
    pub moving_time: u32,
    #[serde(default)]
    pub elapsed_time: u32,
    #[serde(rename = "type", default)]
    pub activity_type: String,
    pub sport_type: String,
    pub start_date: DateTime<Utc>,
    /// Wall-clock start in the athlete's time zone. The service marks it
    /// with a `Z` suffix even though it is not UTC.
    #[serde(default)]
    pub start_date_local: String,
    /// Meters per second
    #[serde(default)]
    pub average_speed: f64,
    #[serde(default)]
    pub max_speed: f64,
}

impl Activity {
    /// Local start time, ignoring the bogus offset. Falls back to `start_date`.
    pub fn local_start(&self) -> NaiveDateTime {
        DateTime::parse_from_rfc3339(&self.start_date_local)
            .map(|dt| dt.naive_local())
            .unwrap_or_else(|_| self.start_date.naive_utc())
    }
}

/// Parse a JSON array of activities.
pub fn parse_activities(json: &str) -> Result<Vec<Activity>> {
    serde_json::from_str(json).context("invalid activities JSON")
}

/// Read and parse an activities file (the cached JSON array).
pub fn load_activities(path: &Path) -> Result<Vec<Activity>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read activities from {}", path.display()))?;
    let activities =
        parse_activities(&json).with_context(|| format!("in {}", path.display()))?;
    log::info!(
        "loaded activities: count={} path={}",
        activities.len(),
        path.display()
    );
    Ok(activities)
}
