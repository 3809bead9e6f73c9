//! One-shot busy checking for a specific requested interval.
//!
//! Unlike the suggestion path, the busy check answers a single question —
//! does this exact window conflict with anything? — and reports every
//! conflicting event, not just the first.

use tracing::{debug, trace};

use crate::availability::effective_interval;
use crate::classify::is_online_meeting;
use crate::event::CalendarEvent;
use crate::policy::SchedulingPolicy;
use crate::slot::Slot;
use crate::suggest::MeetingType;

/// One conflicting event, reported with its original (unbuffered) bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyConflict {
    pub slot: Slot,
    pub summary: String,
}

/// Result of a busy check. Constructed and returned within one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyCheckResult {
    pub is_busy: bool,
    pub conflicts: Vec<BusyConflict>,
}

/// Check whether a requested interval conflicts with existing events.
///
/// The in-person transition buffer applies only when BOTH the existing
/// event and the requested meeting are in-person; otherwise each event
/// blocks its own bounds. All conflicts are collected, each carrying the
/// event's original bounds and summary text. Events with unparseable
/// timestamps are skipped (fail-open).
pub fn check_busy(
    requested: &Slot,
    events: &[CalendarEvent],
    meeting_type: MeetingType,
    policy: &SchedulingPolicy,
) -> BusyCheckResult {
    let mut conflicts = Vec::new();

    for event in events {
        let span = match event.span() {
            Ok(span) => span,
            Err(err) => {
                trace!(%err, "skipping event with unparseable bounds");
                continue;
            }
        };

        let event_in_person = !is_online_meeting(event);
        let buffered = event_in_person && meeting_type == MeetingType::InPerson;
        let blocked = effective_interval(span, buffered, policy);

        if requested.overlaps(&blocked) {
            conflicts.push(BusyConflict {
                slot: span,
                summary: event.summary.clone().unwrap_or_default(),
            });
        }
    }

    debug!(conflicts = conflicts.len(), "busy check complete");
    BusyCheckResult {
        is_busy: !conflicts.is_empty(),
        conflicts,
    }
}
