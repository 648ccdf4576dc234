//! Time token normalization
//!
//! Converts a single loosely formatted time token ("7:30pm", "19:30", "9",
//! "12AM") into a canonical clock time. Callers only pass substrings that
//! already matched one of the time-pattern regexes; a token that still fails
//! to normalize is treated as a candidate miss and skipped, matching the
//! parse-failure handling of the date cascade.

use chrono::NaiveTime;

/// Normalize a matched time token to a `NaiveTime`.
///
/// Minutes default to zero when absent. A `pm` marker adds 12 to hours below
/// 12; `12am` maps to midnight. Markers are case-insensitive.
pub fn normalize_time(token: &str) -> Option<NaiveTime> {
    let lower = token.trim().to_lowercase();
    let is_pm = lower.contains("pm");
    let is_am = lower.contains("am");

    let clock: String = lower
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    let mut parts = clock.split(':');
    let mut hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0,
    };

    if is_pm && hour < 12 {
        hour += 12;
    }
    if is_am && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
