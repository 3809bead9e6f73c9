//! Tests for the tiered suggestion generator.
//!
//! All scenarios pin `now` to Tuesday 2026-03-10 08:00 UTC so tier output
//! is fully deterministic.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::event::{CalendarEvent, ConferenceData, EntryPoint, EventTime};
use slot_engine::{
    suggest_inperson_times, suggest_online_times, suggest_times, MeetingRequest, MeetingType,
    RejectionSet, SchedulingPolicy,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

fn online_event(start: &str, end: &str) -> CalendarEvent {
    CalendarEvent {
        summary: Some("Weekly sync".to_string()),
        start: Some(EventTime::Raw(start.to_string())),
        end: Some(EventTime::Raw(end.to_string())),
        conference_data: Some(ConferenceData {
            entry_points: vec![EntryPoint {
                entry_point_type: Some("video".to_string()),
                uri: Some("https://meet.google.com/abc-defg-hij".to_string()),
            }],
        }),
        ..Default::default()
    }
}

fn in_person_event(start: &str, end: &str) -> CalendarEvent {
    CalendarEvent {
        summary: Some("Design review".to_string()),
        location: Some("Board room 4".to_string()),
        start: Some(EventTime::Raw(start.to_string())),
        end: Some(EventTime::Raw(end.to_string())),
        ..Default::default()
    }
}

fn iso(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

// ── Online: tier 1 (around existing online events) ──────────────────────────

#[test]
fn proposes_slots_before_and_after_an_online_event() {
    // Online event tomorrow 10:00-11:00, 30-minute request: the slot
    // ending at the event's start and the slot starting at its end come
    // first, then weekday evenings fill the remaining capacity.
    let events = vec![online_event("2026-03-11T10:00:00Z", "2026-03-11T11:00:00Z")];
    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert_eq!(suggestions.len(), 5);

    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 11, 9, 30));
    assert_eq!(suggestions[0].slot.end, iso(2026, 3, 11, 10, 0));
    assert_eq!(suggestions[0].reason, "Available time slot");

    assert_eq!(suggestions[1].slot.start, iso(2026, 3, 11, 11, 0));
    assert_eq!(suggestions[1].slot.end, iso(2026, 3, 11, 11, 30));
    assert_eq!(suggestions[1].reason, "Available time slot");

    // Tier 2 fills the rest, evenings first, starting tomorrow.
    assert_eq!(suggestions[2].slot.start, iso(2026, 3, 11, 18, 0));
    assert_eq!(suggestions[2].reason, "6:00 PM on Wednesday, March 11");
    assert_eq!(suggestions[3].slot.start, iso(2026, 3, 11, 17, 30));
    assert_eq!(suggestions[3].reason, "5:30 PM on Wednesday, March 11");
    assert_eq!(suggestions[4].slot.start, iso(2026, 3, 11, 17, 0));
    assert_eq!(suggestions[4].reason, "5:00 PM on Wednesday, March 11");
}

#[test]
fn never_proposes_same_day_neighbors() {
    // The online event is TODAY; both neighbor candidates fall on today's
    // date and are excluded, so only tier-2 slots remain.
    let events = vec![online_event("2026-03-10T15:00:00Z", "2026-03-10T16:00:00Z")];
    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert!(!suggestions.is_empty());
    for s in &suggestions {
        assert!(s.slot.start > now());
        assert!(s.slot.start.date_naive() > now().date_naive());
    }
    assert_eq!(suggestions[0].reason, "6:00 PM on Wednesday, March 11");
}

#[test]
fn neighbors_outside_the_preferred_window_are_skipped() {
    // 20:00-21:00 event: the before-slot starts at 19:30 (window closes at
    // 19) and the after-slot at 21:00. Neither qualifies.
    let events = vec![online_event("2026-03-11T20:00:00Z", "2026-03-11T21:00:00Z")];
    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert!(suggestions
        .iter()
        .all(|s| s.reason != "Available time slot"));
}

#[test]
fn neighbor_conflicting_with_an_in_person_event_is_dropped() {
    // The after-slot 11:00-11:30 lands inside the 10:45-12:30 blocked
    // range of the in-person event and must not be suggested.
    let events = vec![
        online_event("2026-03-12T10:00:00Z", "2026-03-12T11:00:00Z"),
        in_person_event("2026-03-12T11:15:00Z", "2026-03-12T12:00:00Z"),
    ];
    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 12, 9, 30));
    assert!(suggestions
        .iter()
        .all(|s| s.slot.start != iso(2026, 3, 12, 11, 0)));
}

#[test]
fn cap_is_never_exceeded() {
    let events: Vec<CalendarEvent> = (11..=18)
        .map(|day| {
            online_event(
                &format!("2026-03-{:02}T10:00:00Z", day),
                &format!("2026-03-{:02}T11:00:00Z", day),
            )
        })
        .collect();
    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );
    assert_eq!(suggestions.len(), 5);
}

// ── Online: rejection protocol ──────────────────────────────────────────────

#[test]
fn rejected_slots_are_skipped_and_replaced() {
    let events = vec![online_event("2026-03-11T10:00:00Z", "2026-03-11T11:00:00Z")];
    let mut rejected = RejectionSet::new();
    rejected.insert("2026-03-11T09:30:00Z", "2026-03-11T10:00:00Z");

    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &rejected,
        &SchedulingPolicy::default(),
    );

    assert_eq!(suggestions.len(), 5);
    assert!(suggestions
        .iter()
        .all(|s| s.slot.start != iso(2026, 3, 11, 9, 30)));
    // The after-slot moves up to first place.
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 11, 11, 0));
}

#[test]
fn rejection_matches_on_exact_strings_only() {
    // Semantically equal but differently formatted endpoints do not count
    // as the same rejected candidate.
    let events = vec![online_event("2026-03-11T10:00:00Z", "2026-03-11T11:00:00Z")];
    let mut rejected = RejectionSet::new();
    rejected.insert("2026-03-11T09:30:00+00:00", "2026-03-11T10:00:00+00:00");

    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &rejected,
        &SchedulingPolicy::default(),
    );

    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 11, 9, 30));
}

#[test]
fn inserting_a_rejection_twice_changes_nothing() {
    let events = vec![online_event("2026-03-11T10:00:00Z", "2026-03-11T11:00:00Z")];

    let mut once = RejectionSet::new();
    once.insert("2026-03-11T09:30:00Z", "2026-03-11T10:00:00Z");

    let mut twice = RejectionSet::new();
    twice.insert("2026-03-11T09:30:00Z", "2026-03-11T10:00:00Z");
    twice.insert("2026-03-11T09:30:00Z", "2026-03-11T10:00:00Z");
    assert_eq!(once, twice);

    let policy = SchedulingPolicy::default();
    let a = suggest_online_times(30, &events, now(), &once, &policy);
    let b = suggest_online_times(30, &events, now(), &twice, &policy);
    assert_eq!(a, b);
}

// ── Online: Saturday fallback ───────────────────────────────────────────────

#[test]
fn saturday_fallback_proposes_next_saturday() {
    // With the weekday lookahead disabled, the Saturday tier is the only
    // source. 2026-03-14 is a Saturday; from Tuesday that is 4 days out.
    let policy = SchedulingPolicy {
        lookahead_days: 0,
        ..Default::default()
    };
    let suggestions = suggest_online_times(60, &[], now(), &RejectionSet::new(), &policy);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 14, 10, 30));
    assert_eq!(suggestions[0].reason, "Saturday 10:30 AM (March 14)");
}

#[test]
fn saturday_fallback_never_picks_today() {
    // When today IS Saturday, the tier rolls to the following week.
    let saturday_morning = Utc.with_ymd_and_hms(2026, 3, 14, 8, 0, 0).unwrap();
    let policy = SchedulingPolicy {
        lookahead_days: 0,
        ..Default::default()
    };
    let suggestions =
        suggest_online_times(60, &[], saturday_morning, &RejectionSet::new(), &policy);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 21, 10, 30));
    assert_eq!(suggestions[0].reason, "Saturday 10:30 AM (March 21)");
}

// ── In-person: friendly tone ────────────────────────────────────────────────

#[test]
fn friendly_requests_get_lunch_and_dinner_slots() {
    let (suggestions, location) = suggest_inperson_times(
        60,
        "coffee catchup with an old friend",
        &[],
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert!(location.is_none());
    // A day contributes both lunch and dinner before the cap check runs.
    assert_eq!(suggestions.len(), 4);
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 11, 12, 0));
    assert_eq!(suggestions[0].reason, "Lunch time on Wednesday, March 11");
    assert_eq!(suggestions[1].slot.start, iso(2026, 3, 11, 18, 30));
    assert_eq!(suggestions[1].reason, "Dinner time on Wednesday, March 11");
    assert_eq!(suggestions[2].slot.start, iso(2026, 3, 12, 12, 0));
    assert_eq!(suggestions[3].slot.start, iso(2026, 3, 12, 18, 30));
}

#[test]
fn friendly_fallback_moves_to_later_evenings() {
    // Every lunch and dinner for two weeks is blocked by an in-person
    // event from 11:30 to 19:00; only the 19:30 fallback can fit.
    let events: Vec<CalendarEvent> = (0..14)
        .map(|offset| {
            let day = 11 + offset;
            let (month, day) = if day > 31 { (4, day - 31) } else { (3, day) };
            in_person_event(
                &format!("2026-{:02}-{:02}T11:30:00Z", month, day),
                &format!("2026-{:02}-{:02}T19:00:00Z", month, day),
            )
        })
        .collect();

    let (suggestions, _) = suggest_inperson_times(
        30,
        "dinner and drinks",
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 11, 19, 30));
    assert_eq!(suggestions[0].reason, "Evening on Wednesday, March 11");
    assert_eq!(suggestions[1].slot.start, iso(2026, 3, 12, 19, 30));
    assert_eq!(suggestions[2].slot.start, iso(2026, 3, 13, 19, 30));
}

// ── In-person: business tone ────────────────────────────────────────────────

#[test]
fn business_requests_get_afternoon_coffee_and_a_venue() {
    let request = MeetingRequest::new(30, MeetingType::InPerson, None).unwrap();
    let response = suggest_times(
        &request,
        &[],
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert_eq!(
        response.suggested_location.as_deref(),
        Some("Crosstown café, Oxford city centre")
    );
    assert_eq!(response.suggestions.len(), 3);
    assert_eq!(response.suggestions[0].slot.start, iso(2026, 3, 11, 16, 0));
    assert_eq!(
        response.suggestions[0].reason,
        "4:00 PM on Wednesday, March 11"
    );
    assert_eq!(response.suggestions[1].slot.start, iso(2026, 3, 12, 16, 0));
    assert_eq!(response.suggestions[2].slot.start, iso(2026, 3, 13, 16, 0));
}

#[test]
fn business_fallback_scans_the_following_week() {
    // A short in-person event at 16:00 every day blocks the primary tier
    // (its buffer covers 15:30-16:40) but leaves 15:00 and 17:00 open.
    let events: Vec<CalendarEvent> = (0..14)
        .map(|offset| {
            let day = 11 + offset;
            let (month, day) = if day > 31 { (4, day - 31) } else { (3, day) };
            in_person_event(
                &format!("2026-{:02}-{:02}T16:00:00Z", month, day),
                &format!("2026-{:02}-{:02}T16:10:00Z", month, day),
            )
        })
        .collect();

    let (suggestions, location) = suggest_inperson_times(
        30,
        "contract renewal",
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    assert_eq!(
        location.as_deref(),
        Some("Crosstown café, Oxford city centre")
    );
    // Following week starts Tuesday 2026-03-17.
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 17, 15, 0));
    assert_eq!(suggestions[0].reason, "3:00 PM on Tuesday, March 17");
    assert_eq!(suggestions[1].slot.start, iso(2026, 3, 17, 17, 0));
    assert_eq!(suggestions[1].reason, "5:00 PM on Tuesday, March 17");
    assert_eq!(suggestions[2].slot.start, iso(2026, 3, 18, 15, 0));
}

// ── Dispatcher & request validation ─────────────────────────────────────────

#[test]
fn online_requests_never_carry_a_location() {
    let request = MeetingRequest::new(30, MeetingType::Online, None).unwrap();
    let response = suggest_times(
        &request,
        &[],
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );
    assert!(response.suggested_location.is_none());
    assert!(response.suggestions.len() <= 5);
}

#[test]
fn non_positive_duration_is_a_configuration_error() {
    assert!(MeetingRequest::new(0, MeetingType::Online, None).is_err());
    assert!(MeetingRequest::new(-15, MeetingType::InPerson, None).is_err());
    assert!(MeetingRequest::new(1, MeetingType::Online, None).is_ok());
}

#[test]
fn unparseable_events_never_abort_the_scan() {
    let garbled = CalendarEvent {
        summary: Some("Corrupted import".to_string()),
        description: Some("zoom".to_string()),
        start: Some(EventTime::Raw("???".to_string())),
        end: Some(EventTime::Raw("2026-03-11T15:00:00Z".to_string())),
        ..Default::default()
    };
    let events = vec![
        garbled,
        online_event("2026-03-11T10:00:00Z", "2026-03-11T11:00:00Z"),
    ];
    let suggestions = suggest_online_times(
        30,
        &events,
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );

    // The healthy event still drives tier 1.
    assert_eq!(suggestions[0].slot.start, iso(2026, 3, 11, 9, 30));
}

#[test]
fn empty_calendar_still_yields_fallback_suggestions() {
    let suggestions = suggest_online_times(
        30,
        &[],
        now(),
        &RejectionSet::new(),
        &SchedulingPolicy::default(),
    );
    // No tier-1 candidates, but tier 2 fills the list.
    assert_eq!(suggestions.len(), 5);
    assert!(suggestions.iter().all(|s| s.slot.start > now()));
}
