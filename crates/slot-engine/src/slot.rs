//! Half-open time intervals.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, ScheduleError};
use crate::time::format_iso;

/// A half-open interval `[start, end)` between two UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    /// Construct a slot, enforcing `start < end`.
    ///
    /// # Errors
    /// Returns `ScheduleError::Parse` when the interval is empty or
    /// inverted. Callers treat such input as malformed and skip it.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::Parse(format!(
                "empty or inverted interval: {} >= {}",
                format_iso(start),
                format_iso(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// Two half-open intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent slots (one ends exactly when the other starts) do NOT overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The interval expanded by the given number of minutes on both sides.
    pub fn padded(&self, minutes: i64) -> Slot {
        Slot {
            start: self.start - Duration::minutes(minutes),
            end: self.end + Duration::minutes(minutes),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Canonical ISO form of the start instant.
    pub fn start_iso(&self) -> String {
        format_iso(self.start)
    }

    /// Canonical ISO form of the end instant.
    pub fn end_iso(&self) -> String {
        format_iso(self.end)
    }
}
