//! # slot-engine
//!
//! Deterministic meeting-slot suggestion and availability checking for AI
//! calendar agents.
//!
//! The engine is the pure core of a scheduling assistant: the surrounding
//! agent extracts a request from conversation and fetches calendar events;
//! this crate classifies those events, applies layered scheduling
//! preferences and transition buffers through interval arithmetic, and
//! produces an ordered list of up to five concrete candidate slots — or a
//! yes/no busy answer for a specific requested interval. No I/O, no clock
//! access, no hidden state: every operation is a pure function of its
//! inputs, including `now`.
//!
//! ## Modules
//!
//! - [`time`] — lenient ISO-8601 ingestion, canonical UTC output
//! - [`slot`] — half-open time intervals and the overlap test
//! - [`event`] — the calendar event wire type and boundary normalization
//! - [`classify`] — online/in-person and friendly/business heuristics
//! - [`policy`] — the immutable scheduling-preference configuration
//! - [`availability`] — the buffered overlap test for candidate slots
//! - [`suggest`] — the tiered suggestion generator
//! - [`busy`] — one-shot conflict listing for a requested interval
//! - [`error`] — error types

pub mod availability;
pub mod busy;
pub mod classify;
pub mod error;
pub mod event;
pub mod policy;
pub mod slot;
pub mod suggest;
pub mod time;

pub use availability::{effective_interval, is_slot_free};
pub use busy::{check_busy, BusyCheckResult, BusyConflict};
pub use classify::{is_friendly_meeting, is_online_meeting};
pub use error::ScheduleError;
pub use event::{CalendarEvent, ConferenceData, EntryPoint, EventTime};
pub use policy::SchedulingPolicy;
pub use slot::Slot;
pub use suggest::{
    suggest_inperson_times, suggest_online_times, suggest_times, MeetingRequest, MeetingType,
    RejectionSet, Suggestion, SuggestionResponse,
};
pub use time::{format_iso, parse_lenient_iso};
