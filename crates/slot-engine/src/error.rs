//! Error types for slot-engine operations.

use thiserror::Error;

/// Errors that can surface from the scheduling core.
///
/// Nothing here is fatal to an overall request: unparseable events are
/// skipped where they occur, and a malformed meeting request surfaces to
/// the caller as "no suggestions possible" rather than a system failure.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A timestamp could not be interpreted as a date/time.
    #[error("Unparseable timestamp: {0}")]
    Parse(String),

    /// The meeting request itself is unusable (e.g., non-positive duration).
    #[error("Invalid meeting request: {0}")]
    Configuration(String),
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, ScheduleError>;
