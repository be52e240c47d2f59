//! Utility functions for duration and timestamp rendering.
//!
//! This module provides the small formatting helpers shared by the report
//! composition code: uptime rendering and relative ages for timestamps.

use chrono::{DateTime, Utc};

/// Formats a duration in seconds as `{d}d {h}h {m}m {s}s`.
///
/// Zero-valued units are dropped; the seconds unit is always shown, so a
/// zero duration renders as `0s`.
///
/// # Examples
///
/// ```
/// # use knightbot::utils::human_duration;
/// assert_eq!(human_duration(0), "0s");
/// assert_eq!(human_duration(45), "45s");
/// assert_eq!(human_duration(90061), "1d 1h 1m 1s");
/// ```
pub fn human_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", seconds));

    parts.join(" ")
}

/// Renders how long ago `then` was, relative to `now`.
///
/// Produces coarse human phrases ("a few seconds ago", "3 days ago") with
/// thresholds placed so a quantity reads as singular slightly past its exact
/// boundary (89 seconds is still "a minute ago"). Timestamps in the future,
/// which can appear with clock skew, are treated as "a few seconds ago".
///
/// # Examples
///
/// ```
/// # use chrono::{Duration, Utc};
/// # use knightbot::utils::relative_age;
/// let now = Utc::now();
/// assert_eq!(relative_age(now - Duration::days(3), now), "3 days ago");
/// assert_eq!(relative_age(now - Duration::seconds(10), now), "a few seconds ago");
/// ```
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (seconds as f64 / 3_600.0).round() as i64;
    let days = (seconds as f64 / 86_400.0).round() as i64;
    let months = (days as f64 / 30.0).round() as i64;
    let years = (days as f64 / 365.0).round() as i64;

    if seconds < 45 {
        "a few seconds ago".to_owned()
    } else if seconds < 90 {
        "a minute ago".to_owned()
    } else if minutes < 45 {
        format!("{} minutes ago", minutes)
    } else if minutes < 90 {
        "an hour ago".to_owned()
    } else if hours < 22 {
        format!("{} hours ago", hours)
    } else if hours < 36 {
        "a day ago".to_owned()
    } else if days < 26 {
        format!("{} days ago", days)
    } else if days < 46 {
        "a month ago".to_owned()
    } else if days < 320 {
        format!("{} months ago", months)
    } else if days < 548 {
        "a year ago".to_owned()
    } else {
        format!("{} years ago", years)
    }
}
