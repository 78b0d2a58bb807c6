use chrono::{DateTime, Utc};

/// Countdown values below this many seconds are flagged urgent.
pub const URGENT_BELOW_SECS: u32 = 60;

/// `m:ss` with minutes unbounded, e.g. `90:00` for a ninety minute exam.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

/// Attempt length for the results screen, `m:ss` like the countdown.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[must_use]
pub fn is_urgent(seconds: u32) -> bool {
    seconds < URGENT_BELOW_SECS
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}
