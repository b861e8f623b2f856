//! Error types for availability-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid calendar key: {0}")]
    InvalidCalendarKey(String),

    /// The proposal's end time is not strictly after its start time.
    /// The message is shown verbatim in the availability form.
    #[error("End time must be after start time")]
    EndNotAfterStart,

    /// A saved calendar holds a window whose end is not after its start.
    #[error("Invalid window {window} under {key}: end time must be after start time")]
    InvalidStoredWindow { key: String, window: String },

    /// A date range spans more days than a single proposal may cover.
    #[error("Date range is too long: {days} days (at most {max})")]
    RangeTooLong { days: i64, max: i64 },

    #[error("Slot must have either a date or recurring days, not {0}")]
    AmbiguousAnchor(&'static str),
}

pub type Result<T> = std::result::Result<T, EngineError>;
