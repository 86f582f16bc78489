use chrono::{DateTime, Utc};

const UNITS: [(&str, i64); 7] = [
    ("year", 365 * 24 * 60 * 60),
    ("month", 30 * 24 * 60 * 60),
    ("week", 7 * 24 * 60 * 60),
    ("day", 24 * 60 * 60),
    ("hour", 60 * 60),
    ("minute", 60),
    ("second", 1),
];

/// Relative description such as "3 hours ago" or "2 days from now".
pub fn for_humans(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(at).num_seconds();
    let secs = delta.abs();
    if secs < 1 {
        return "just now".to_string();
    }
    let (unit, size) = UNITS
        .iter()
        .copied()
        .find(|(_, size)| secs >= *size)
        .unwrap_or(("second", 1));
    let n = secs / size;
    let plural = if n == 1 { "" } else { "s" };
    let direction = if delta >= 0 { "ago" } else { "from now" };
    format!("{n} {unit}{plural} {direction}")
}

pub fn with_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
