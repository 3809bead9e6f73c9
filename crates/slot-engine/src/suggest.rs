//! Tiered meeting-time suggestion.
//!
//! Produces an ordered, capped list of candidate slots for a requested
//! meeting. Candidates come from preference tiers evaluated strictly in
//! order — earlier tiers win even when a later tier would yield an earlier
//! calendar date — and every candidate passes the buffered availability
//! check and the caller's rejection set before it is accepted. Once the
//! cap is reached, remaining tiers are not consulted.
//!
//! Online meetings piggyback on existing online events first (the slot
//! immediately before or after one), then fall back to early-evening
//! weekday slots, then to a Saturday mid-morning. In-person meetings are
//! split by tone: friendly requests get lunch/dinner slots, business
//! requests get an afternoon coffee at a fixed venue, each with its own
//! fallback pass.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::is_slot_free;
use crate::classify::{is_friendly_meeting, is_online_meeting};
use crate::error::{Result, ScheduleError};
use crate::event::CalendarEvent;
use crate::policy::SchedulingPolicy;
use crate::slot::Slot;

/// Fixed venue attached to in-person business suggestions.
const BUSINESS_MEETING_VENUE: &str = "Crosstown café, Oxford city centre";

/// Tone fallback when a request carries no description.
const DEFAULT_DESCRIPTION: &str = "business meeting";

/// In-person tiers stop accumulating once this many suggestions exist.
const IN_PERSON_TIER_CAP: usize = 3;

/// Online weekday fallback clock times, tried in order per day.
const WEEKDAY_FALLBACK_TIMES: [(u32, u32); 3] = [(18, 0), (17, 30), (17, 0)];

/// Online Saturday fallback clock time.
const SATURDAY_FALLBACK_TIME: (u32, u32) = (10, 30);

/// Friendly in-person clock times.
const LUNCH_TIME: (u32, u32) = (12, 0);
const DINNER_TIME: (u32, u32) = (18, 30);
const EVENING_TIME: (u32, u32) = (19, 30);

/// Business in-person clock times.
const COFFEE_TIME: (u32, u32) = (16, 0);
const BUSINESS_FALLBACK_HOURS: [u32; 3] = [15, 16, 17];

/// Requested meeting kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingType {
    Online,
    InPerson,
}

/// A validated meeting request. Created per call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    duration_minutes: i64,
    meeting_type: MeetingType,
    description: Option<String>,
}

impl MeetingRequest {
    /// Validate and construct a request.
    ///
    /// # Errors
    /// Returns `ScheduleError::Configuration` for a non-positive duration.
    pub fn new(
        duration_minutes: i64,
        meeting_type: MeetingType,
        description: Option<String>,
    ) -> Result<Self> {
        if duration_minutes <= 0 {
            return Err(ScheduleError::Configuration(format!(
                "duration must be positive, got {} minutes",
                duration_minutes
            )));
        }
        Ok(Self {
            duration_minutes,
            meeting_type,
            description,
        })
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn meeting_type(&self) -> MeetingType {
        self.meeting_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Slots the user has already declined in earlier suggestion rounds.
///
/// Keyed on the EXACT `(start_iso, end_iso)` string pair the engine
/// previously emitted — not semantic equality — so callers must resubmit
/// the ISO strings verbatim. Supplied on every call; the engine only ever
/// reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionSet {
    rejected: HashSet<(String, String)>,
}

impl RejectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declined slot. Inserting the same pair twice has the same
    /// filtering effect as inserting it once.
    pub fn insert(&mut self, start_iso: impl Into<String>, end_iso: impl Into<String>) {
        self.rejected.insert((start_iso.into(), end_iso.into()));
    }

    pub fn contains(&self, start_iso: &str, end_iso: &str) -> bool {
        self.rejected
            .contains(&(start_iso.to_string(), end_iso.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl FromIterator<(String, String)> for RejectionSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            rejected: iter.into_iter().collect(),
        }
    }
}

/// A single suggested slot with its own rationale.
///
/// The reason states only the chosen slot's rationale ("Lunch time on
/// Thursday, March 12") and never references other calendar entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub slot: Slot,
    pub reason: String,
}

/// Generator output: ordered suggestions plus an optional fixed location
/// (attached for in-person business meetings).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
    pub suggested_location: Option<String>,
}

/// Dispatch a validated request to the per-type generator.
///
/// The event list is a read-only snapshot covering the lookahead window;
/// malformed entries are skipped individually, and an empty suggestion
/// list is a valid outcome, not an error.
pub fn suggest_times(
    request: &MeetingRequest,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    rejected: &RejectionSet,
    policy: &SchedulingPolicy,
) -> SuggestionResponse {
    match request.meeting_type() {
        MeetingType::Online => SuggestionResponse {
            suggestions: suggest_online_times(
                request.duration_minutes(),
                events,
                now,
                rejected,
                policy,
            ),
            suggested_location: None,
        },
        MeetingType::InPerson => {
            let description = request.description().unwrap_or(DEFAULT_DESCRIPTION);
            let (suggestions, suggested_location) = suggest_inperson_times(
                request.duration_minutes(),
                description,
                events,
                now,
                rejected,
                policy,
            );
            SuggestionResponse {
                suggestions,
                suggested_location,
            }
        }
    }
}

/// Suggest up to `policy.max_suggestions` slots for an online meeting.
///
/// Tiers, in strict preference order:
/// 1. For each existing online event (in input order), the slot ending
///    exactly when the event starts, then the slot starting exactly when
///    it ends. Both must start after `now`, on a later calendar date than
///    `now`, and inside the preferred window. The after-slot takes a
///    lead-in buffer when the preceding event is in-person.
/// 2. The next `lookahead_days` days starting tomorrow, weekdays only,
///    trying the early-evening times in descending order per day.
/// 3. The next Saturday strictly after today (today-is-Saturday rolls to
///    the following week), mid-morning.
pub fn suggest_online_times(
    duration_minutes: i64,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    rejected: &RejectionSet,
    policy: &SchedulingPolicy,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::new();
    let cap = policy.max_suggestions;
    let duration = Duration::minutes(duration_minutes);

    // Tier 1: piggyback on existing online meetings.
    for event in events.iter().filter(|e| is_online_meeting(e)) {
        if suggestions.len() >= cap {
            break;
        }
        let Ok(span) = event.span() else { continue };

        // The "before" candidate ends exactly when the event starts.
        let before = Slot {
            start: span.start - duration,
            end: span.start,
        };
        if before.start > now
            && before.start.date_naive() > now.date_naive()
            && policy.starts_within_window(before.start)
        {
            try_candidate(
                &mut suggestions,
                before,
                "Available time slot".to_string(),
                events,
                0,
                false,
                rejected,
                policy,
            );
        }
        if suggestions.len() >= cap {
            break;
        }

        // The "after" candidate starts exactly when the event ends, with a
        // lead-in buffer when the preceding event was in-person.
        let after = Slot {
            start: span.end,
            end: span.end + duration,
        };
        if after.start > now
            && after.start.date_naive() > now.date_naive()
            && after.start.hour() < policy.preferred_end_hour
            && policy.ends_within_window(after.end)
        {
            let buffer = if is_online_meeting(event) {
                0
            } else {
                policy.online_trailing_buffer_minutes
            };
            try_candidate(
                &mut suggestions,
                after,
                "Available time slot".to_string(),
                events,
                buffer,
                false,
                rejected,
                policy,
            );
        }
    }
    debug!(count = suggestions.len(), "online tier 1 complete");

    // Tier 2: early-evening slots on free weekdays, starting tomorrow.
    if suggestions.len() < cap {
        let tomorrow = now.date_naive() + Duration::days(1);
        for day_offset in 0..policy.lookahead_days {
            if suggestions.len() >= cap {
                break;
            }
            let date = tomorrow + Duration::days(day_offset);
            if !is_weekday(date) {
                continue;
            }
            for (hour, minute) in WEEKDAY_FALLBACK_TIMES {
                if suggestions.len() >= cap {
                    break;
                }
                let candidate = slot_at(date, hour, minute, duration_minutes);
                if candidate.start <= now || !policy.ends_within_window(candidate.end) {
                    continue;
                }
                let reason = format!(
                    "{} on {}",
                    format_clock(hour, minute),
                    date.format("%A, %B %d")
                );
                try_candidate(
                    &mut suggestions,
                    candidate,
                    reason,
                    events,
                    0,
                    false,
                    rejected,
                    policy,
                );
            }
        }
    }

    // Tier 3: the next Saturday strictly after today, mid-morning.
    if suggestions.len() < cap {
        let today = now.date_naive();
        let mut days_until = (Weekday::Sat.num_days_from_monday() as i64
            - today.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);
        if days_until == 0 {
            // Today is Saturday: roll to the following week.
            days_until = 7;
        }
        let saturday = today + Duration::days(days_until);
        let (hour, minute) = SATURDAY_FALLBACK_TIME;
        let candidate = slot_at(saturday, hour, minute, duration_minutes);
        if candidate.start > now {
            let reason = format!(
                "Saturday {} ({})",
                format_clock(hour, minute),
                saturday.format("%B %d")
            );
            try_candidate(
                &mut suggestions,
                candidate,
                reason,
                events,
                0,
                false,
                rejected,
                policy,
            );
        }
    }

    finalize(suggestions, rejected, policy)
}

/// Suggest slots for an in-person meeting, plus an optional fixed venue.
///
/// The request description decides the tone. Friendly: lunch then dinner
/// per day over the lookahead window, with a later-evening fallback pass.
/// Business: afternoon coffee at a fixed venue over the lookahead window,
/// with a following-week mid-afternoon weekday fallback. Each pass stops
/// accumulating at three suggestions.
pub fn suggest_inperson_times(
    duration_minutes: i64,
    description: &str,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
    rejected: &RejectionSet,
    policy: &SchedulingPolicy,
) -> (Vec<Suggestion>, Option<String>) {
    let mut suggestions: Vec<Suggestion> = Vec::new();
    let friendly = is_friendly_meeting(description);
    let location = if friendly {
        None
    } else {
        Some(BUSINESS_MEETING_VENUE.to_string())
    };
    let tomorrow = now.date_naive() + Duration::days(1);

    if friendly {
        // Lunch, then dinner, day by day; a single day may contribute both.
        for day_offset in 0..policy.lookahead_days {
            let date = tomorrow + Duration::days(day_offset);

            let (hour, minute) = LUNCH_TIME;
            let lunch = slot_at(date, hour, minute, duration_minutes);
            if lunch.start > now {
                try_candidate(
                    &mut suggestions,
                    lunch,
                    format!("Lunch time on {}", date.format("%A, %B %d")),
                    events,
                    0,
                    true,
                    rejected,
                    policy,
                );
            }

            let (hour, minute) = DINNER_TIME;
            let dinner = slot_at(date, hour, minute, duration_minutes);
            if dinner.start > now {
                try_candidate(
                    &mut suggestions,
                    dinner,
                    format!("Dinner time on {}", date.format("%A, %B %d")),
                    events,
                    0,
                    true,
                    rejected,
                    policy,
                );
            }

            if suggestions.len() >= IN_PERSON_TIER_CAP {
                break;
            }
        }
    } else {
        for day_offset in 0..policy.lookahead_days {
            let date = tomorrow + Duration::days(day_offset);
            let (hour, minute) = COFFEE_TIME;
            let coffee = slot_at(date, hour, minute, duration_minutes);
            if coffee.start > now
                && try_candidate(
                    &mut suggestions,
                    coffee,
                    format!("{} on {}", format_clock(hour, minute), date.format("%A, %B %d")),
                    events,
                    0,
                    true,
                    rejected,
                    policy,
                )
                && suggestions.len() >= IN_PERSON_TIER_CAP
            {
                break;
            }
        }
    }
    debug!(count = suggestions.len(), friendly, "in-person primary tier complete");

    // Fallback pass, only when the primary tier found nothing at all.
    if suggestions.is_empty() {
        if friendly {
            for day_offset in 0..policy.lookahead_days {
                let date = tomorrow + Duration::days(day_offset);
                let (hour, minute) = EVENING_TIME;
                let evening = slot_at(date, hour, minute, duration_minutes);
                if evening.start > now
                    && try_candidate(
                        &mut suggestions,
                        evening,
                        format!("Evening on {}", date.format("%A, %B %d")),
                        events,
                        0,
                        true,
                        rejected,
                        policy,
                    )
                    && suggestions.len() >= IN_PERSON_TIER_CAP
                {
                    break;
                }
            }
        } else {
            // Following week, weekdays only, mid-afternoon hours in order.
            let next_week = now.date_naive() + Duration::days(7);
            'days: for day_offset in 0..7 {
                let date = next_week + Duration::days(day_offset);
                if !is_weekday(date) {
                    continue;
                }
                for hour in BUSINESS_FALLBACK_HOURS {
                    let candidate = slot_at(date, hour, 0, duration_minutes);
                    if candidate.start > now
                        && try_candidate(
                            &mut suggestions,
                            candidate,
                            format!("{} on {}", format_clock(hour, 0), date.format("%A, %B %d")),
                            events,
                            0,
                            true,
                            rejected,
                            policy,
                        )
                        && suggestions.len() >= IN_PERSON_TIER_CAP
                    {
                        break 'days;
                    }
                }
            }
        }
    }

    (finalize(suggestions, rejected, policy), location)
}

/// Validate one candidate and append it when it survives the rejection
/// check and the availability check. Returns whether it was appended.
#[allow(clippy::too_many_arguments)]
fn try_candidate(
    suggestions: &mut Vec<Suggestion>,
    candidate: Slot,
    reason: String,
    events: &[CalendarEvent],
    buffer_minutes: i64,
    candidate_in_person: bool,
    rejected: &RejectionSet,
    policy: &SchedulingPolicy,
) -> bool {
    let start_iso = candidate.start_iso();
    let end_iso = candidate.end_iso();
    if rejected.contains(&start_iso, &end_iso) {
        debug!(start = %start_iso, end = %end_iso, "candidate was previously rejected");
        return false;
    }
    if !is_slot_free(&candidate, events, buffer_minutes, candidate_in_person, policy) {
        return false;
    }
    suggestions.push(Suggestion {
        slot: candidate,
        reason,
    });
    true
}

/// Final filter pass: drop rejected slots once more (defense in depth —
/// every candidate was already checked on entry) and enforce the cap.
fn finalize(
    mut suggestions: Vec<Suggestion>,
    rejected: &RejectionSet,
    policy: &SchedulingPolicy,
) -> Vec<Suggestion> {
    suggestions.retain(|s| !rejected.contains(&s.slot.start_iso(), &s.slot.end_iso()));
    suggestions.truncate(policy.max_suggestions);
    suggestions
}

/// Candidate slot at a fixed clock time on a given date, UTC.
fn slot_at(date: NaiveDate, hour: u32, minute: u32, duration_minutes: i64) -> Slot {
    let start = date
        .and_hms_opt(hour, minute, 0)
        .expect("fixed clock times are valid")
        .and_utc();
    Slot {
        start,
        end: start + Duration::minutes(duration_minutes),
    }
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 12-hour clock label, e.g. `6:00 PM`, `10:30 AM`.
fn format_clock(hour: u32, minute: u32) -> String {
    let (display_hour, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:{:02} {}", display_hour, minute, suffix)
}
