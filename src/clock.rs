//! Clock strings for the status bar and lock screen.

use chrono::NaiveDateTime;

/// Status bar time, zero padded: `09:05`.
pub fn status_time(now: &NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

/// Lock screen time, hour unpadded: `9:05`.
pub fn lock_time(now: &NaiveDateTime) -> String {
    now.format("%-H:%M").to_string()
}

/// Lock screen date: `Sunday, January 5`.
pub fn lock_date(now: &NaiveDateTime) -> String {
    now.format("%A, %B %-d").to_string()
}

/// Large hour shown on the home screen.
pub fn home_hour(now: &NaiveDateTime) -> String {
    now.format("%H").to_string()
}
