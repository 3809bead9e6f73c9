//! WASM bindings for slot-engine.
//!
//! Exposes meeting-slot suggestion and busy checking to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings: the
//! events payload is the same calendar-record array the engine consumes
//! natively, and the results are the wire contracts the response-formatting
//! side expects (`{start_iso, end_iso, reason}` suggestions and
//! `{is_busy, conflicts}` busy reports).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use slot_engine::{
    check_busy, parse_lenient_iso, suggest_times, CalendarEvent, MeetingRequest, MeetingType,
    RejectionSet, SchedulingPolicy, Slot,
};

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SuggestionDto {
    start_iso: String,
    end_iso: String,
    reason: String,
}

#[derive(Serialize)]
struct SuggestOutputDto {
    suggestions: Vec<SuggestionDto>,
    suggested_location: Option<String>,
}

#[derive(Serialize)]
struct ConflictDto {
    start_iso: String,
    end_iso: String,
    summary: String,
}

#[derive(Serialize)]
struct BusyOutputDto {
    is_busy: bool,
    conflicts: Vec<ConflictDto>,
}

/// A previously declined slot, as resubmitted by the caller.
#[derive(Deserialize)]
struct RejectedSlotInput {
    start_iso: String,
    end_iso: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the calendar-record JSON array the engine consumes.
fn parse_events_json(json: &str) -> Result<Vec<CalendarEvent>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

/// Parse the optional rejected-slots JSON array into a `RejectionSet`.
fn parse_rejections_json(json: Option<String>) -> Result<RejectionSet, JsValue> {
    let Some(json) = json else {
        return Ok(RejectionSet::new());
    };
    let slots: Vec<RejectedSlotInput> = serde_json::from_str(&json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rejected slots JSON: {}", e)))?;
    Ok(slots
        .into_iter()
        .map(|s| (s.start_iso, s.end_iso))
        .collect())
}

fn parse_meeting_type(raw: &str) -> Result<MeetingType, JsValue> {
    match raw {
        "online" => Ok(MeetingType::Online),
        "in-person" => Ok(MeetingType::InPerson),
        other => Err(JsValue::from_str(&format!(
            "Unknown meeting type '{}': expected 'online' or 'in-person'",
            other
        ))),
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Suggest up to five candidate slots for a new meeting.
///
/// Returns a JSON string of the form
/// `{"suggestions": [{"start_iso", "end_iso", "reason"}, ...],
///   "suggested_location": string | null}`.
///
/// # Arguments
/// - `events_json` -- JSON array of calendar records covering the lookahead window
/// - `duration_minutes` -- Meeting length in minutes (must be positive)
/// - `meeting_type` -- `"online"` or `"in-person"`
/// - `description` -- Optional free-text purpose (drives the in-person tone)
/// - `rejected_json` -- Optional JSON array of `{start_iso, end_iso}` pairs
///   the user already declined
/// - `now_iso` -- The current instant, ISO-8601 (the engine never reads a clock)
#[wasm_bindgen(js_name = "suggestTimes")]
pub fn suggest_times_js(
    events_json: &str,
    duration_minutes: u32,
    meeting_type: &str,
    description: Option<String>,
    rejected_json: Option<String>,
    now_iso: &str,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let rejected = parse_rejections_json(rejected_json)?;
    let meeting_type = parse_meeting_type(meeting_type)?;
    let now = parse_lenient_iso(now_iso).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let request = MeetingRequest::new(duration_minutes as i64, meeting_type, description)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let response = suggest_times(
        &request,
        &events,
        now,
        &rejected,
        &SchedulingPolicy::default(),
    );

    let dto = SuggestOutputDto {
        suggestions: response
            .suggestions
            .iter()
            .map(|s| SuggestionDto {
                start_iso: s.slot.start_iso(),
                end_iso: s.slot.end_iso(),
                reason: s.reason.clone(),
            })
            .collect(),
        suggested_location: response.suggested_location,
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check whether a requested interval conflicts with existing events.
///
/// Returns a JSON string of the form
/// `{"is_busy": bool, "conflicts": [{"start_iso", "end_iso", "summary"}, ...]}`.
///
/// # Arguments
/// - `events_json` -- JSON array of calendar records
/// - `start_iso` / `end_iso` -- The requested window, ISO-8601
/// - `meeting_type` -- `"online"` or `"in-person"` (the transition buffer
///   around in-person events applies only to in-person requests)
#[wasm_bindgen(js_name = "checkBusy")]
pub fn check_busy_js(
    events_json: &str,
    start_iso: &str,
    end_iso: &str,
    meeting_type: &str,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let meeting_type = parse_meeting_type(meeting_type)?;

    let start = parse_lenient_iso(start_iso).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let end = parse_lenient_iso(end_iso).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let requested = Slot::new(start, end).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = check_busy(
        &requested,
        &events,
        meeting_type,
        &SchedulingPolicy::default(),
    );

    let dto = BusyOutputDto {
        is_busy: result.is_busy,
        conflicts: result
            .conflicts
            .iter()
            .map(|c| ConflictDto {
                start_iso: c.slot.start_iso(),
                end_iso: c.slot.end_iso(),
                summary: c.summary.clone(),
            })
            .collect(),
    };

    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
