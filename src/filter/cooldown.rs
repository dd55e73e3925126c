//! Cooldown check on candidate publish times

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_time(time: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(time.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Whole days elapsed between `time` and `now`, truncated toward zero
pub fn age_in_days(time: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - time).num_hours() / 24
}

/// Returns true if an update published at `time` may be shown
///
/// `days <= 0` disables the check. A missing or unparsable timestamp is eligible.
pub fn is_eligible(time: Option<&str>, days: i64, now: DateTime<Utc>) -> bool {
    if days <= 0 {
        return true;
    }
    match time.and_then(parse_time) {
        Some(published) => age_in_days(published, now) >= days,
        None => true,
    }
}
