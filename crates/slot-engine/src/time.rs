//! Lenient ISO-8601 parsing and canonical UTC formatting.
//!
//! Calendar providers emit timestamps in several shapes: RFC 3339 with a
//! `Z` suffix or explicit offset, naive datetimes carrying no offset at
//! all, and bare dates for all-day events. Ingestion accepts all of them
//! and normalizes to UTC; output is always `YYYY-MM-DDTHH:MM:SSZ` with no
//! sub-second component. Naive and aware instants are never compared —
//! everything becomes a `DateTime<Utc>` at this boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};

use crate::error::{Result, ScheduleError};

/// Parse a lenient ISO-8601 timestamp into a UTC instant.
///
/// Accepted forms:
/// - RFC 3339 with `Z` or an explicit offset (`2026-03-12T15:00:00Z`,
///   `2026-03-12T16:00:00+01:00`), with or without fractional seconds
/// - Naive datetime, interpreted as UTC (`2026-03-12T15:00:00`,
///   `2026-03-12T15:00`)
/// - Bare date, interpreted as midnight UTC (`2026-03-12`) — all-day events
///
/// Sub-second precision is truncated on ingestion so instants compare and
/// round-trip at whole-second granularity.
///
/// # Errors
/// Returns `ScheduleError::Parse` if the string has no recognizable
/// date/time structure.
pub fn parse_lenient_iso(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ScheduleError::Parse("empty timestamp".to_string()));
    }

    // RFC 3339 covers the `Z` suffix and explicit offsets.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(0));
    }

    // Naive datetime with no offset: assume UTC. `%.f` matches an optional
    // fractional part, so the first format covers both variants.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc().trunc_subsecs(0));
        }
    }

    // Bare date: midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ScheduleError::Parse(format!(
        "unrecognized timestamp: {}",
        s
    )))
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Round-trip law: `parse_lenient_iso(&format_iso(x))` equals `x` for any
/// instant with zero fractional seconds.
pub fn format_iso(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
