//! Presentation helpers for note lists.
//!
//! Purely presentational: relative date labels and first-line previews.
//! No timezone normalization beyond what `chrono` provides.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use crate::model::time::parse_timestamp;

/// Preview length used when callers pass `0`.
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;
/// Label returned for empty bodies.
pub const EMPTY_PREVIEW: &str = "No content";

const ELLIPSIS: &str = "...";
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Formats an RFC 3339 date string relative to the local clock.
///
/// Returns `None` when `date_string` cannot be parsed.
pub fn format_date(date_string: &str) -> Option<String> {
    let date = parse_timestamp(date_string)?.with_timezone(&Local);
    Some(format_relative_date(&date, &Local::now()))
}

/// Formats `date` relative to `now`.
///
/// - under 24 hours (including future dates): `HH:MM`
/// - under 7 days: short weekday, e.g. `Tue`
/// - otherwise: short month and day, e.g. `Mar 10`
pub fn format_relative_date<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let elapsed = now
        .naive_utc()
        .signed_duration_since(date.naive_utc())
        .num_seconds();

    if elapsed < SECONDS_PER_DAY {
        date.format("%H:%M").to_string()
    } else if elapsed < SECONDS_PER_WEEK {
        date.format("%a").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Returns the first line of `body`, truncated to `max_length` characters.
///
/// Truncated previews keep `max_length - 3` characters and end in `...`.
/// A `max_length` of `0` falls back to [`DEFAULT_PREVIEW_LENGTH`].
pub fn preview(body: &str, max_length: usize) -> String {
    if body.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    let max_length = if max_length == 0 {
        DEFAULT_PREVIEW_LENGTH
    } else {
        max_length
    };
    let first_line = body.split('\n').next().unwrap_or_default();
    if first_line.chars().count() <= max_length {
        return first_line.to_string();
    }

    let mut truncated: String = first_line
        .chars()
        .take(max_length.saturating_sub(ELLIPSIS.len()))
        .collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
