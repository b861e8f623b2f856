//! Detect proposed slots that double-book existing availability.
//!
//! A dated slot is compared only with windows stored under that date, and a
//! recurring slot only with windows stored under its weekdays. Adjacent windows
//! (one ends exactly when the other starts) are NOT conflicts.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::calendar::{AvailabilityCalendar, CalendarKey};
use crate::expander::{expand_proposal, AvailabilityProposal};
use crate::report::{ConflictDetail, ConflictReport, Finding, FindingKind};
use crate::slot::{SlotAnchor, TimeSlot};
use crate::time::TimeWindow;

/// Find every overlap between `proposed` slots and the existing `calendar`.
///
/// Findings follow slot order, then the calendar's stored order for each key.
/// Identical messages are reported once. The calendar is only read.
pub fn find_conflicts(proposed: &[TimeSlot], calendar: &AvailabilityCalendar) -> ConflictReport {
    let mut report = ConflictReport::new();

    for slot in proposed {
        match &slot.anchor {
            SlotAnchor::Date(date) => {
                check_key(&mut report, CalendarKey::Date(*date), &slot.window, calendar);
            }
            SlotAnchor::Weekdays(days) => {
                for day in days {
                    check_key(&mut report, CalendarKey::Weekday(*day), &slot.window, calendar);
                }
            }
        }
    }

    debug!(
        "checked {} proposed slot(s) against {} existing window(s): {} conflict(s)",
        proposed.len(),
        calendar.len(),
        report.len()
    );
    report
}

fn check_key(
    report: &mut ConflictReport,
    key: CalendarKey,
    proposed: &TimeWindow,
    calendar: &AvailabilityCalendar,
) {
    for existing in calendar.windows(&key) {
        trace!("{}: {} vs {}", key, proposed, existing);
        if !existing.is_valid() {
            debug!("{}: skipping stored window {} with end not after start", key, existing);
            continue;
        }
        if !proposed.overlaps(existing) {
            continue;
        }
        report.push(Finding {
            kind: FindingKind::Conflict,
            message: conflict_message(&key, proposed, existing),
            detail: Some(ConflictDetail {
                key,
                proposed: *proposed,
                existing: *existing,
                overlap_minutes: proposed.overlap_minutes(existing),
            }),
        });
    }
}

/// `Conflict on Saturday, June 28, 2025: 14:00-16:00 overlaps with existing 15:00-17:00`
/// for a date, `Conflict on Monday: ...` for a weekday.
fn conflict_message(key: &CalendarKey, proposed: &TimeWindow, existing: &TimeWindow) -> String {
    let on = match key {
        CalendarKey::Date(date) => date.format("%A, %B %-d, %Y").to_string(),
        CalendarKey::Weekday(day) => day.label().to_string(),
    };
    format!("Conflict on {}: {} overlaps with existing {}", on, proposed, existing)
}

/// The outcome of checking one proposal: the slots that would be saved and
/// everything blocking the save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub slots: Vec<TimeSlot>,
    pub report: ConflictReport,
}

impl Evaluation {
    /// Safe to save: something to save and nothing blocking it.
    pub fn can_save(&self) -> bool {
        !self.slots.is_empty() && self.report.is_empty()
    }
}

/// Expand `proposal` and check the result against `calendar`.
///
/// A validation failure is reported as the only finding and yields no slots.
pub fn evaluate(proposal: &AvailabilityProposal, calendar: &AvailabilityCalendar) -> Evaluation {
    match expand_proposal(proposal) {
        Ok(slots) => {
            let report = find_conflicts(&slots, calendar);
            Evaluation { slots, report }
        }
        Err(e) => {
            debug!("proposal rejected: {}", e);
            Evaluation {
                slots: Vec::new(),
                report: ConflictReport::validation(e.to_string()),
            }
        }
    }
}
