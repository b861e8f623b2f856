//! # availability-engine
//!
//! Availability expansion and double-booking detection for the Live Local
//! Beats marketplace.
//!
//! Musicians and venues publish availability as time windows on specific
//! dates or on recurring weekdays. Before a new selection is saved, it is
//! expanded into concrete slots and checked against what is already stored;
//! every overlap comes back as a message the form can show.
//!
//! ```rust
//! use availability_engine::{evaluate, AvailabilityCalendar, AvailabilityProposal};
//!
//! let calendar: AvailabilityCalendar =
//!     serde_json::from_str(r#"{"2025-06-28":[{"startTime":"15:00","endTime":"17:00"}]}"#).unwrap();
//! let proposal: AvailabilityProposal = serde_json::from_str(
//!     r#"{"startTime":"14:00","endTime":"16:00","mode":"single","date":"2025-06-28"}"#,
//! )
//! .unwrap();
//!
//! let result = evaluate(&proposal, &calendar);
//! assert!(!result.can_save());
//! assert_eq!(
//!     result.report.messages().collect::<Vec<_>>(),
//!     ["Conflict on Saturday, June 28, 2025: 14:00-16:00 overlaps with existing 15:00-17:00"]
//! );
//! ```
//!
//! ## Modules
//!
//! - [`time`] -- `HH:MM` times of day, windows and the overlap test
//! - [`slot`] -- slots anchored to a date or to weekdays
//! - [`calendar`] -- existing availability keyed by date or weekday
//! - [`expander`] -- proposal (single / range / recurring) → concrete slots
//! - [`conflict`] -- overlap detection and the expand-then-check pipeline
//! - [`report`] -- tagged, de-duplicated findings
//! - [`form`] -- availability form state and its pure reducer
//! - [`booking`] -- booking status workflow
//! - [`error`] -- Error types

pub mod booking;
pub mod calendar;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod form;
pub mod report;
pub mod slot;
pub mod time;

pub use booking::{BookingAction, BookingError, BookingStatus};
pub use calendar::{AvailabilityCalendar, CalendarKey};
pub use conflict::{evaluate, find_conflicts, Evaluation};
pub use error::EngineError;
pub use expander::{expand_proposal, AvailabilityProposal, ProposalMode, MAX_RANGE_DAYS};
pub use form::{reduce, FormEvent, FormState, ModeSelection};
pub use report::{ConflictReport, Finding, FindingKind};
pub use slot::{DayOfWeek, SlotAnchor, TimeSlot};
pub use time::{overlaps, TimeOfDay, TimeWindow};
