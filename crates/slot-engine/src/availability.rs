//! Buffered availability checking.
//!
//! Decides whether a candidate interval is free against a snapshot of
//! events. In-person events are expanded by a fixed transition buffer on
//! both sides; the buffer applies whether the candidate itself is online
//! or in-person, because travel time from an in-person event matters to
//! both kinds of follow-up meeting. Online events block only their own
//! bounds.
//!
//! Events with unparseable timestamps are skipped, never treated as
//! conflicts — the engine fails open, favoring availability over false
//! conflicts from malformed input.

use chrono::Duration;
use tracing::{debug, trace};

use crate::classify::is_online_meeting;
use crate::event::CalendarEvent;
use crate::policy::SchedulingPolicy;
use crate::slot::Slot;

/// An event's blocked interval after type-dependent buffer expansion.
///
/// With `with_in_person_buffer`, the bounds grow by
/// `policy.in_person_buffer_minutes` on both sides; otherwise they are the
/// event's own bounds.
pub fn effective_interval(span: Slot, with_in_person_buffer: bool, policy: &SchedulingPolicy) -> Slot {
    if with_in_person_buffer {
        span.padded(policy.in_person_buffer_minutes)
    } else {
        span
    }
}

/// Check whether a candidate slot is free.
///
/// `buffer_minutes` extends the candidate's own start backward — the
/// lead-in used by the "right after an existing event" suggestion tier.
/// `candidate_in_person` does not alter the outcome (the transition buffer
/// around existing in-person events applies to candidates of either kind);
/// it scopes the diagnostic output.
pub fn is_slot_free(
    candidate: &Slot,
    events: &[CalendarEvent],
    buffer_minutes: i64,
    candidate_in_person: bool,
    policy: &SchedulingPolicy,
) -> bool {
    let probe = Slot {
        start: candidate.start - Duration::minutes(buffer_minutes),
        end: candidate.end,
    };

    for event in events {
        let span = match event.span() {
            Ok(span) => span,
            Err(err) => {
                trace!(%err, "skipping event with unparseable bounds");
                continue;
            }
        };

        let event_in_person = !is_online_meeting(event);
        let blocked = effective_interval(span, event_in_person, policy);

        if probe.overlaps(&blocked) {
            debug!(
                candidate_start = %candidate.start_iso(),
                candidate_end = %candidate.end_iso(),
                blocked_start = %blocked.start_iso(),
                blocked_end = %blocked.end_iso(),
                event_in_person,
                candidate_in_person,
                "candidate conflicts with an existing event"
            );
            return false;
        }
    }

    true
}
