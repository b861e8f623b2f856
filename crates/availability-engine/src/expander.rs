//! Proposal expansion -- converts what the user picked in the availability form
//! into the concrete slots that get checked and saved.
//!
//! A proposal is one time window plus a mode:
//!
//! - `single` -- one date
//! - `range` -- every calendar day from `fromDate` to `toDate`, inclusive
//! - `recurring` -- a set of weekdays, optionally with an end date
//!
//! Dates are plain calendar dates. Nothing here is timezone-shifted. A range
//! may span at most [`MAX_RANGE_DAYS`] days.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::{DayOfWeek, TimeSlot};
use crate::time::{TimeOfDay, TimeWindow};

/// Longest inclusive date range a single proposal may expand to.
pub const MAX_RANGE_DAYS: i64 = 366;

/// How the proposal's window is anchored.
///
/// Every field is optional because the form evaluates partially filled input on
/// each change; a missing piece just means there is nothing to expand yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProposalMode {
    Single {
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    Range {
        #[serde(default, rename = "fromDate")]
        from_date: Option<NaiveDate>,
        #[serde(default, rename = "toDate")]
        to_date: Option<NaiveDate>,
    },
    Recurring {
        #[serde(default, rename = "recurringDays")]
        days: Vec<DayOfWeek>,
        #[serde(default, rename = "recurringEndDate")]
        end_date: Option<NaiveDate>,
    },
}

/// The user's in-progress availability selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityProposal {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(flatten)]
    pub mode: ProposalMode,
}

impl AvailabilityProposal {
    pub fn single(start_time: TimeOfDay, end_time: TimeOfDay, date: NaiveDate) -> Self {
        Self {
            start_time,
            end_time,
            mode: ProposalMode::Single { date: Some(date) },
        }
    }

    pub fn range(
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Self {
        Self {
            start_time,
            end_time,
            mode: ProposalMode::Range {
                from_date: Some(from_date),
                to_date: Some(to_date),
            },
        }
    }

    pub fn recurring(
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        days: Vec<DayOfWeek>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            mode: ProposalMode::Recurring { days, end_date },
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

/// Expand a proposal into concrete slots.
///
/// Recurring proposals yield one slot per selected weekday, each anchored to
/// that weekday only. Incomplete input (no date, a missing or reversed range
/// bound, no weekdays) yields an empty list rather than an error.
///
/// # Errors
/// Returns [`EngineError::EndNotAfterStart`] when `end_time <= start_time`.
/// This is checked before the mode, so it is reported even for incomplete input.
/// Returns [`EngineError::RangeTooLong`] when a range covers more than
/// [`MAX_RANGE_DAYS`] days.
pub fn expand_proposal(proposal: &AvailabilityProposal) -> Result<Vec<TimeSlot>> {
    let window = proposal.window();
    if !window.is_valid() {
        return Err(EngineError::EndNotAfterStart);
    }

    let slots = match &proposal.mode {
        ProposalMode::Single { date } => date
            .map(|d| vec![TimeSlot::on_date(d, window)])
            .unwrap_or_default(),
        ProposalMode::Range { from_date, to_date } => match (from_date, to_date) {
            (Some(from), Some(to)) => expand_date_range(*from, *to, window)?,
            _ => Vec::new(),
        },
        ProposalMode::Recurring { days, end_date } => {
            let mut seen = Vec::with_capacity(days.len());
            for day in days {
                if !seen.contains(day) {
                    seen.push(*day);
                }
            }
            seen.into_iter()
                .map(|day| TimeSlot::recurring(vec![day], window, *end_date))
                .collect()
        }
    };

    debug!("expanded {} proposal into {} slot(s)", proposal.mode.name(), slots.len());
    Ok(slots)
}

/// One dated slot per day in `[from, to]`. Empty when `from > to`.
fn expand_date_range(from: NaiveDate, to: NaiveDate, window: TimeWindow) -> Result<Vec<TimeSlot>> {
    let days = (to - from).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(EngineError::RangeTooLong {
            days,
            max: MAX_RANGE_DAYS,
        });
    }
    debug!("range {} to {} spans {} day(s)", from, to, days.max(0));

    Ok(from
        .iter_days()
        .take_while(|d| *d <= to)
        .map(|d| TimeSlot::on_date(d, window))
        .collect())
}

impl ProposalMode {
    pub fn name(&self) -> &'static str {
        match self {
            ProposalMode::Single { .. } => "single",
            ProposalMode::Range { .. } => "range",
            ProposalMode::Recurring { .. } => "recurring",
        }
    }
}
