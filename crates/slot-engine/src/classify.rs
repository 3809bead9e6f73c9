//! Event classification heuristics.
//!
//! Labels an event as online or in-person, and an in-person meeting's tone
//! as friendly or business. The online check is a deliberate priority
//! chain: explicit conference metadata and link text outrank the presence
//! or absence of a location field, which outranks generic keyword sniffing.

use crate::event::CalendarEvent;

/// Domains that identify a video-meeting link wherever they appear.
const MEETING_LINK_DOMAINS: [&str; 4] = [
    "meet.google.com",
    "zoom.us",
    "teams.microsoft.com",
    "webex.com",
];

/// Generic virtual-meeting indicators, consulted only when the event has
/// neither conference metadata, a link, nor a location.
const ONLINE_KEYWORDS: [&str; 10] = [
    "zoom",
    "meet",
    "teams",
    "webex",
    "google meet",
    "video call",
    "online",
    "virtual",
    "link:",
    "call",
];

/// Social-tone indicators for in-person meetings.
const FRIENDLY_KEYWORDS: [&str; 16] = [
    "lunch",
    "dinner",
    "hangout",
    "catchup",
    "catch up",
    "drinks",
    "pub",
    "coffee",
    "tea",
    "brunch",
    "breakfast",
    "social",
    "friend",
    "friends",
    "casual",
    "informal",
];

/// Decide whether an event is an online meeting.
///
/// Priority order:
/// 1. Conference metadata with a `video` entry point, or an entry-point URI
///    on a known meeting-provider domain → online.
/// 2. A meeting-link domain anywhere in the description, summary, or
///    location text → online.
/// 3. A non-empty location (and no link) → in-person.
/// 4. Otherwise, generic online keywords in the description and summary
///    decide; no match → in-person.
pub fn is_online_meeting(event: &CalendarEvent) -> bool {
    if let Some(conference) = &event.conference_data {
        for entry in &conference.entry_points {
            let entry_type = entry
                .entry_point_type
                .as_deref()
                .unwrap_or("")
                .to_lowercase();
            let uri = entry.uri.as_deref().unwrap_or("").to_lowercase();
            if entry_type == "video" || MEETING_LINK_DOMAINS.iter().any(|d| uri.contains(d)) {
                return true;
            }
        }
    }

    let text = event.combined_text();
    if MEETING_LINK_DOMAINS.iter().any(|d| text.contains(d)) {
        return true;
    }

    if event
        .location
        .as_deref()
        .is_some_and(|l| !l.trim().is_empty())
    {
        return false;
    }

    // No link, no location: fall back to keyword sniffing over the
    // description and summary (location was already ruled out above).
    let body = event.body_text();
    ONLINE_KEYWORDS.iter().any(|k| body.contains(k))
}

/// Decide whether a meeting description carries a social (friendly) tone.
///
/// Case-insensitive keyword scan. An empty description defaults to
/// business tone.
pub fn is_friendly_meeting(description: &str) -> bool {
    if description.is_empty() {
        return false;
    }
    let lower = description.to_lowercase();
    FRIENDLY_KEYWORDS.iter().any(|k| lower.contains(k))
}
