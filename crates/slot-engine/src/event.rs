//! Calendar event wire types and boundary normalization.
//!
//! Events arrive from the calendar-retrieval collaborator as loosely
//! populated records in the common provider shape. The type here is strict
//! about structure — every field is an explicit `Option` — and resolution
//! to a [`Slot`] happens once at the boundary, so the algorithms never
//! re-check shapes mid-scan.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::slot::Slot;
use crate::time::parse_lenient_iso;

/// Start or end marker of an event.
///
/// Providers send either a bare ISO-8601 string or a structured
/// `{dateTime}` / `{date}` object (the `date` variant marks all-day
/// events). Both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// Bare ISO-8601 string.
    Raw(String),
    /// Structured marker: a full datetime or a bare date for all-day events.
    Structured {
        #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
        date_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
}

impl EventTime {
    /// The raw timestamp string, preferring `dateTime` over `date`.
    pub fn raw(&self) -> Option<&str> {
        match self {
            EventTime::Raw(s) => Some(s),
            EventTime::Structured { date_time, date } => {
                date_time.as_deref().or(date.as_deref())
            }
        }
    }
}

/// A single conference entry point (video link, phone dial-in, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryPoint {
    pub entry_point_type: Option<String>,
    pub uri: Option<String>,
}

/// Conference metadata attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConferenceData {
    pub entry_points: Vec<EntryPoint>,
}

/// A calendar event as supplied by the calendar-retrieval collaborator.
///
/// Read-only input for the duration of one call; the engine never mutates
/// or stores these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub conference_data: Option<ConferenceData>,
}

impl CalendarEvent {
    /// Resolve the event's time bounds into a [`Slot`].
    ///
    /// # Errors
    /// Returns `ScheduleError::Parse` when either bound is missing or
    /// unparseable, or when the interval is empty/inverted. Callers follow
    /// the fail-open policy: skip the event rather than treat it as a
    /// conflict.
    pub fn span(&self) -> Result<Slot> {
        let start = parse_lenient_iso(raw_bound(&self.start, "start")?)?;
        let end = parse_lenient_iso(raw_bound(&self.end, "end")?)?;
        Slot::new(start, end)
    }

    /// Description, summary, and location concatenated and lowercased, for
    /// link-domain scans.
    pub(crate) fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.description.as_deref().unwrap_or(""),
            self.summary.as_deref().unwrap_or(""),
            self.location.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    /// Description and summary only (location excluded), lowercased.
    pub(crate) fn body_text(&self) -> String {
        format!(
            "{} {}",
            self.description.as_deref().unwrap_or(""),
            self.summary.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

fn raw_bound<'a>(marker: &'a Option<EventTime>, which: &str) -> Result<&'a str> {
    marker
        .as_ref()
        .and_then(|t| t.raw())
        .ok_or_else(|| ScheduleError::Parse(format!("event has no {} time", which)))
}
