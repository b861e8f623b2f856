//! Availability form state and its reducer.
//!
//! The whole form is one immutable [`FormState`] value. The UI feeds
//! [`FormEvent`]s through [`reduce`] and renders whatever comes back. Every
//! change to the selection or the calendar re-runs [`evaluate`], so the
//! conflict list and the save button are always in step with the input.

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::calendar::AvailabilityCalendar;
use crate::conflict::{evaluate, Evaluation};
use crate::expander::{AvailabilityProposal, ProposalMode};
use crate::slot::DayOfWeek;
use crate::time::TimeOfDay;

/// Which date picker the form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSelection {
    #[default]
    Single,
    Range,
    Recurring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub mode: ModeSelection,
    pub date: Option<NaiveDate>,
    pub range_from: Option<NaiveDate>,
    pub range_to: Option<NaiveDate>,
    /// Selected weekdays in the order they were ticked.
    pub weekdays: Vec<DayOfWeek>,
    pub recurring_end_date: Option<NaiveDate>,
    pub calendar: Arc<AvailabilityCalendar>,
    pub evaluation: Evaluation,
    pub saving: bool,
    pub save_error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            mode: ModeSelection::default(),
            date: None,
            range_from: None,
            range_to: None,
            weekdays: Vec::new(),
            recurring_end_date: None,
            calendar: Arc::new(AvailabilityCalendar::new()),
            evaluation: Evaluation::default(),
            saving: false,
            save_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    StartTimeChanged(Option<TimeOfDay>),
    EndTimeChanged(Option<TimeOfDay>),
    ModeChanged(ModeSelection),
    DateChanged(Option<NaiveDate>),
    RangeFromChanged(Option<NaiveDate>),
    RangeToChanged(Option<NaiveDate>),
    WeekdayToggled(DayOfWeek),
    RecurringEndDateChanged(Option<NaiveDate>),
    CalendarLoaded(Arc<AvailabilityCalendar>),
    SaveRequested,
    /// The slots were stored; carries the calendar reloaded from the store.
    SaveSucceeded(Arc<AvailabilityCalendar>),
    SaveFailed(String),
    /// Clear the selection. Ignored while a save is in flight.
    Reset,
}

impl FormState {
    pub fn with_calendar(calendar: Arc<AvailabilityCalendar>) -> Self {
        Self {
            calendar,
            ..Self::default()
        }
    }

    /// The proposal described by the current selection, if both times are set.
    pub fn proposal(&self) -> Option<AvailabilityProposal> {
        let mode = match self.mode {
            ModeSelection::Single => ProposalMode::Single { date: self.date },
            ModeSelection::Range => ProposalMode::Range {
                from_date: self.range_from,
                to_date: self.range_to,
            },
            ModeSelection::Recurring => ProposalMode::Recurring {
                days: self.weekdays.clone(),
                end_date: self.recurring_end_date,
            },
        };
        Some(AvailabilityProposal {
            start_time: self.start_time?,
            end_time: self.end_time?,
            mode,
        })
    }

    /// Conflict and validation messages to list under the form.
    pub fn messages(&self) -> Vec<&str> {
        self.evaluation.report.messages().collect()
    }

    pub fn can_save(&self) -> bool {
        !self.saving && self.evaluation.can_save()
    }

    fn reevaluate(mut self) -> Self {
        self.evaluation = match self.proposal() {
            Some(proposal) => evaluate(&proposal, &self.calendar),
            None => Evaluation::default(),
        };
        self
    }

    fn cleared_selection(self) -> Self {
        FormState {
            calendar: self.calendar,
            mode: self.mode,
            ..FormState::default()
        }
    }
}

/// Apply one event to the form. Pure: `state` is never modified.
pub fn reduce(state: &FormState, event: FormEvent) -> FormState {
    let mut next = state.clone();

    match event {
        FormEvent::StartTimeChanged(t) => next.start_time = t,
        FormEvent::EndTimeChanged(t) => next.end_time = t,
        FormEvent::ModeChanged(mode) => next.mode = mode,
        FormEvent::DateChanged(d) => next.date = d,
        FormEvent::RangeFromChanged(d) => next.range_from = d,
        FormEvent::RangeToChanged(d) => next.range_to = d,
        FormEvent::WeekdayToggled(day) => {
            if let Some(pos) = next.weekdays.iter().position(|d| *d == day) {
                next.weekdays.remove(pos);
            } else {
                next.weekdays.push(day);
            }
        }
        FormEvent::RecurringEndDateChanged(d) => next.recurring_end_date = d,
        FormEvent::CalendarLoaded(calendar) => next.calendar = calendar,
        FormEvent::SaveRequested => {
            if !state.can_save() {
                debug!("save requested while blocked; ignoring");
                return next;
            }
            next.saving = true;
            next.save_error = None;
            return next;
        }
        FormEvent::SaveSucceeded(calendar) => {
            next.calendar = calendar;
            return next.cleared_selection();
        }
        FormEvent::SaveFailed(message) => {
            next.saving = false;
            next.save_error = Some(message);
            return next;
        }
        FormEvent::Reset => {
            if state.saving {
                debug!("reset requested while a save is in flight; ignoring");
                return next;
            }
            return next.cleared_selection();
        }
    }

    next.reevaluate()
}
