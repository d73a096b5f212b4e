//! Timestamp helpers for note lifecycle fields.
//!
//! Timestamps are UTC with microsecond precision so that the in-memory value
//! and its stored RFC 3339 text always round-trip to the same instant.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

/// UTC instant used for `created_at`/`updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Returns the current time truncated to storage precision.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Returns a timestamp strictly later than `previous`.
///
/// Uses the current clock when it has moved past `previous`, otherwise bumps
/// `previous` by one microsecond.
pub fn next_after(previous: Timestamp) -> Timestamp {
    let current = now();
    if current > previous {
        current
    } else {
        // Why: two edits within one clock tick must still order strictly,
        // so list order by `updated_at` reflects the latest edit.
        previous + Duration::microseconds(1)
    }
}

/// Formats a timestamp in its storage form (`2026-03-10T09:05:00.000000Z`).
pub fn to_storage_text(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses an RFC 3339 string into a UTC timestamp.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{next_after, parse_timestamp, to_storage_text};
    use chrono::{TimeZone, Utc};

    #[test]
    fn storage_text_round_trips() {
        let value = Utc.with_ymd_and_hms(2026, 3, 10, 9, 5, 0).unwrap();
        let text = to_storage_text(&value);
        assert_eq!(text, "2026-03-10T09:05:00.000000Z");
        assert_eq!(parse_timestamp(&text), Some(value));
    }

    #[test]
    fn next_after_is_strictly_later_for_future_input() {
        let future = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();
        let next = next_after(future);
        assert!(next > future);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_timestamp("not a date"), None);
    }
}
