//! Date formatting for display and form fields

use chrono::{Duration, NaiveDateTime};

use super::timestamp::{self, INPUT_FORMAT};

/// `May 1, 2024 9:30 AM`
pub fn due_date(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// `9:30 AM`
pub fn clock(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// `May 1, 2024 9:30 AM - 11:00 AM`
pub fn time_span(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!("{} - {}", due_date(start), clock(end))
}

/// Relative start label used on the dashboard:
/// `Today at 9:30 AM`, `Tomorrow at 9:30 AM`, otherwise `May 3, 9:30 AM`
pub fn schedule_time(start: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let day = start.date();
    if day == now.date() {
        format!("Today at {}", clock(start))
    } else if Some(day) == now.date().checked_add_signed(Duration::days(1)) {
        format!("Tomorrow at {}", clock(start))
    } else {
        start.format("%b %-d, %-I:%M %p").to_string()
    }
}

/// Editable representation, e.g. `2024-05-01T09:30`
pub fn to_input(dt: &NaiveDateTime) -> String {
    dt.format(INPUT_FORMAT).to_string()
}

/// Parse an editable timestamp back. Seconds are optional.
pub fn parse_input(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    timestamp::parse(s)
}
