//! Availability slots: a time window anchored to a date or to weekdays.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time::{TimeOfDay, TimeWindow};

/// A day of the week, serialized as its lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Lowercase key used in calendars and JSON (`"monday"`).
    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// Capitalized name used in messages (`"Monday"`).
    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(d: DayOfWeek) -> Self {
        match d {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::InvalidWeekday(s.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a slot is pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotAnchor {
    /// A single concrete calendar date.
    Date(NaiveDate),
    /// Repeats on each listed weekday. Never empty.
    Weekdays(Vec<DayOfWeek>),
}

/// A single availability window, anchored either to a date or to weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    pub window: TimeWindow,
    pub anchor: SlotAnchor,
    /// Informational only; conflict checks never consult it.
    pub recurring_end_date: Option<NaiveDate>,
}

impl TimeSlot {
    pub fn on_date(date: NaiveDate, window: TimeWindow) -> Self {
        Self {
            window,
            anchor: SlotAnchor::Date(date),
            recurring_end_date: None,
        }
    }

    pub fn recurring(
        days: Vec<DayOfWeek>,
        window: TimeWindow,
        recurring_end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            window,
            anchor: SlotAnchor::Weekdays(days),
            recurring_end_date,
        }
    }

    pub fn start_time(&self) -> TimeOfDay {
        self.window.start_time
    }

    pub fn end_time(&self) -> TimeOfDay {
        self.window.end_time
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match &self.anchor {
            SlotAnchor::Date(d) => Some(*d),
            SlotAnchor::Weekdays(_) => None,
        }
    }

    /// The weekdays of a recurring slot; empty for a date-anchored one.
    pub fn recurring_days(&self) -> &[DayOfWeek] {
        match &self.anchor {
            SlotAnchor::Date(_) => &[],
            SlotAnchor::Weekdays(days) => days,
        }
    }
}

/// Wire form of [`TimeSlot`], matching the availability records the form saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeSlot {
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recurring_days: Option<Vec<DayOfWeek>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recurring_end_date: Option<NaiveDate>,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = EngineError;

    fn try_from(raw: RawTimeSlot) -> Result<Self> {
        let window = TimeWindow::new(raw.start_time, raw.end_time);
        if !window.is_valid() {
            return Err(EngineError::EndNotAfterStart);
        }

        let days = raw.recurring_days.filter(|d| !d.is_empty());
        let anchor = match (raw.date, days) {
            (Some(date), None) => SlotAnchor::Date(date),
            (None, Some(days)) => SlotAnchor::Weekdays(days),
            (Some(_), Some(_)) => return Err(EngineError::AmbiguousAnchor("both")),
            (None, None) => return Err(EngineError::AmbiguousAnchor("neither")),
        };

        Ok(TimeSlot {
            window,
            anchor,
            recurring_end_date: raw.recurring_end_date,
        })
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        let (date, recurring_days) = match slot.anchor {
            SlotAnchor::Date(d) => (Some(d), None),
            SlotAnchor::Weekdays(days) => (None, Some(days)),
        };
        RawTimeSlot {
            start_time: slot.window.start_time,
            end_time: slot.window.end_time,
            date,
            recurring_days,
            recurring_end_date: slot.recurring_end_date,
        }
    }
}
