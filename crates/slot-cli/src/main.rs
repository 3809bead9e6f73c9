//! `slots` CLI — suggest meeting times and check busy status from the
//! command line.
//!
//! Events are supplied as a JSON array of calendar records (the shape the
//! calendar-retrieval side produces); output is the JSON contract the
//! response-formatting side consumes.
//!
//! ## Usage
//!
//! ```sh
//! # Suggest online meeting slots against a calendar snapshot
//! slots suggest --duration-minutes 30 --meeting-type online -e events.json
//!
//! # Pipe events on stdin; pin the clock for reproducible output
//! cat events.json | slots suggest --duration-minutes 60 \
//!     --meeting-type in-person --description "coffee catchup" \
//!     --now 2026-03-10T08:00:00Z
//!
//! # Carry forward previously declined slots
//! slots suggest --duration-minutes 30 --meeting-type online \
//!     -e events.json --rejected rejected.json
//!
//! # One-shot busy check for a specific window
//! slots busy --start 2026-03-11T15:00:00Z --end 2026-03-11T15:30:00Z \
//!     --meeting-type in-person -e events.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

use slot_engine::{
    check_busy, parse_lenient_iso, suggest_times, CalendarEvent, MeetingRequest, MeetingType,
    RejectionSet, SchedulingPolicy, Slot,
};

#[derive(Parser)]
#[command(name = "slots", version, about = "Meeting slot suggestion and busy checking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum MeetingKind {
    /// Video/virtual meeting
    Online,
    /// Face-to-face meeting (transition buffers apply)
    InPerson,
}

impl From<MeetingKind> for MeetingType {
    fn from(kind: MeetingKind) -> Self {
        match kind {
            MeetingKind::Online => MeetingType::Online,
            MeetingKind::InPerson => MeetingType::InPerson,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest up to five candidate slots for a new meeting
    Suggest {
        /// Meeting length in minutes
        #[arg(long)]
        duration_minutes: i64,
        /// Whether the meeting is online or in-person
        #[arg(long, value_enum)]
        meeting_type: MeetingKind,
        /// Free-text purpose of the meeting (drives the in-person tone)
        #[arg(long)]
        description: Option<String>,
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// JSON file of previously declined {start_iso, end_iso} pairs
        #[arg(long)]
        rejected: Option<String>,
        /// Scheduling policy overrides, JSON file
        #[arg(long)]
        policy: Option<String>,
        /// Pin "now" for reproducible runs (ISO-8601; defaults to the current time)
        #[arg(long)]
        now: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check whether a specific interval conflicts with existing events
    Busy {
        /// Requested window start (ISO-8601)
        #[arg(long)]
        start: String,
        /// Requested window end (ISO-8601)
        #[arg(long)]
        end: String,
        /// Whether the requested meeting is online or in-person
        #[arg(long, value_enum)]
        meeting_type: MeetingKind,
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<String>,
        /// Scheduling policy overrides, JSON file
        #[arg(long)]
        policy: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Output/input DTOs — the wire contracts, field for field
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SuggestionDto {
    start_iso: String,
    end_iso: String,
    reason: String,
}

#[derive(Serialize)]
struct SuggestOutput {
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
struct BusyOutput {
    is_busy: bool,
    conflicts: Vec<ConflictDto>,
}

/// A previously declined slot, resubmitted verbatim by the caller.
#[derive(Deserialize)]
struct RejectedSlot {
    start_iso: String,
    end_iso: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            duration_minutes,
            meeting_type,
            description,
            events,
            rejected,
            policy,
            now,
            output,
        } => {
            let events = read_events(events.as_deref())?;
            let rejected = read_rejections(rejected.as_deref())?;
            let policy = read_policy(policy.as_deref())?;
            let now = resolve_now(now.as_deref())?;

            let request = MeetingRequest::new(duration_minutes, meeting_type.into(), description)
                .context("No suggestions possible")?;

            let response = suggest_times(&request, &events, now, &rejected, &policy);
            let out = SuggestOutput {
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
            write_output(output.as_deref(), &serde_json::to_string_pretty(&out)?)?;
        }
        Commands::Busy {
            start,
            end,
            meeting_type,
            events,
            policy,
            output,
        } => {
            let events = read_events(events.as_deref())?;
            let policy = read_policy(policy.as_deref())?;

            let start = parse_lenient_iso(&start)
                .with_context(|| format!("Invalid --start value: {}", start))?;
            let end = parse_lenient_iso(&end)
                .with_context(|| format!("Invalid --end value: {}", end))?;
            let requested = Slot::new(start, end)
                .context("The requested window must start before it ends")?;

            let result = check_busy(&requested, &events, meeting_type.into(), &policy);
            let out = BusyOutput {
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
            write_output(output.as_deref(), &serde_json::to_string_pretty(&out)?)?;
        }
    }

    Ok(())
}

/// Parse the events JSON from a file or stdin.
fn read_events(path: Option<&str>) -> Result<Vec<CalendarEvent>> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse events JSON")
}

/// Parse the rejected-slots file into a `RejectionSet`, if supplied.
fn read_rejections(path: Option<&str>) -> Result<RejectionSet> {
    let Some(path) = path else {
        return Ok(RejectionSet::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    let slots: Vec<RejectedSlot> =
        serde_json::from_str(&json).context("Failed to parse rejected slots JSON")?;
    Ok(slots
        .into_iter()
        .map(|s| (s.start_iso, s.end_iso))
        .collect())
}

/// Load scheduling policy overrides, or the defaults when no file is given.
fn read_policy(path: Option<&str>) -> Result<SchedulingPolicy> {
    let Some(path) = path else {
        return Ok(SchedulingPolicy::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&json).context("Failed to parse policy JSON")
}

/// The pinned `--now` instant, or the wall clock.
fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => {
            parse_lenient_iso(raw).with_context(|| format!("Invalid --now value: {}", raw))
        }
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
