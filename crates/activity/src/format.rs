//! Display strings for the run panel.

use crate::record::Activity;

/// `"10.23 km"`
pub fn format_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Pace per kilometer from moving time, `"m:ss /km"`, or `"-"` without distance.
pub fn format_pace(moving_seconds: u32, meters: f64) -> String {
    if !(meters > 0.0) {
        return "-".to_string();
    }
    let sec_per_km = f64::from(moving_seconds) / (meters / 1000.0);
    let minutes = (sec_per_km / 60.0).floor() as u64;
    let seconds = (sec_per_km % 60.0).floor() as u64;
    format!("{}:{:02} /km", minutes, seconds)
}

/// `"h:mm:ss"` from an hour up, `"m:ss"` below.
pub fn format_elapsed(seconds: u32) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Local start as `"YYYY-MM-DD HH:MM"`
pub fn format_start(activity: &Activity) -> String {
    activity.local_start().format("%Y-%m-%d %H:%M").to_string()
}
