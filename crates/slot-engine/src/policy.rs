//! Scheduling policy configuration.
//!
//! Every fixed window, buffer, and cap lives in one immutable structure
//! passed into the suggestion generator and availability checker, so a
//! policy change never touches algorithm code.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Immutable scheduling preferences.
///
/// Window checks are hour/minute-granular, matching the generator's
/// arithmetic: a slot "starts within the window" when its start time is at
/// or after the opening hour:minute and its start hour is strictly below
/// the closing hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Opening hour of the preferred window.
    pub preferred_start_hour: u32,
    /// Opening minute of the preferred window.
    pub preferred_start_minute: u32,
    /// Closing hour of the preferred window.
    pub preferred_end_hour: u32,
    /// Fixed transition buffer around existing in-person events, in minutes.
    pub in_person_buffer_minutes: i64,
    /// Lead-in buffer for a slot directly after an in-person event, in minutes.
    pub online_trailing_buffer_minutes: i64,
    /// How many days ahead the generator scans for candidates.
    pub lookahead_days: i64,
    /// Hard cap on returned suggestions.
    pub max_suggestions: usize,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            preferred_start_hour: 9,
            preferred_start_minute: 30,
            preferred_end_hour: 19,
            in_person_buffer_minutes: 30,
            online_trailing_buffer_minutes: 15,
            lookahead_days: 14,
            max_suggestions: 5,
        }
    }
}

impl SchedulingPolicy {
    /// Whether a candidate start instant lies within the preferred window.
    pub fn starts_within_window(&self, t: DateTime<Utc>) -> bool {
        let after_open = t.hour() > self.preferred_start_hour
            || (t.hour() == self.preferred_start_hour && t.minute() >= self.preferred_start_minute);
        after_open && t.hour() < self.preferred_end_hour
    }

    /// Whether a candidate end instant falls no later than the closing hour.
    pub fn ends_within_window(&self, t: DateTime<Utc>) -> bool {
        t.hour() <= self.preferred_end_hour
    }
}
