//! Existing availability, keyed by concrete date or by weekday.
//!
//! The calendar is what a musician or venue has already saved. The engine only
//! ever reads it; [`AvailabilityCalendar::with_slots`] returns a new value and
//! leaves the original untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::slot::{DayOfWeek, SlotAnchor, TimeSlot};
use crate::time::TimeWindow;

/// A calendar key: either a `YYYY-MM-DD` date or a lowercase weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CalendarKey {
    Date(NaiveDate),
    Weekday(DayOfWeek),
}

impl FromStr for CalendarKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(day) = s.parse::<DayOfWeek>() {
            return Ok(CalendarKey::Weekday(day));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(CalendarKey::Date)
            .map_err(|_| EngineError::InvalidCalendarKey(s.to_string()))
    }
}

impl fmt::Display for CalendarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarKey::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CalendarKey::Weekday(w) => f.write_str(w.as_str()),
        }
    }
}

/// Saved availability: ordered windows per key.
///
/// Window order within a key is preserved exactly as stored, since conflict
/// messages are reported in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<TimeWindow>>",
    into = "BTreeMap<String, Vec<TimeWindow>>"
)]
pub struct AvailabilityCalendar {
    entries: BTreeMap<CalendarKey, Vec<TimeWindow>>,
}

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Windows stored under `key`, in stored order. Empty when the key is absent.
    pub fn windows(&self, key: &CalendarKey) -> &[TimeWindow] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn windows_on_weekday(&self, day: DayOfWeek) -> &[TimeWindow] {
        self.windows(&CalendarKey::Weekday(day))
    }

    /// Append a window under `key`.
    pub fn push(&mut self, key: CalendarKey, window: TimeWindow) {
        self.entries.entry(key).or_default().push(window);
    }

    /// A copy of this calendar with `slots` merged in, the way a save lands in
    /// the backing store: a dated slot under its date, a recurring slot under
    /// each of its weekdays.
    pub fn with_slots(&self, slots: &[TimeSlot]) -> Self {
        let mut merged = self.clone();
        for slot in slots {
            match &slot.anchor {
                SlotAnchor::Date(date) => merged.push(CalendarKey::Date(*date), slot.window),
                SlotAnchor::Weekdays(days) => {
                    for day in days {
                        merged.push(CalendarKey::Weekday(*day), slot.window);
                    }
                }
            }
        }
        merged
    }

    /// Keys in calendar order (dates ascending, then Monday to Sunday).
    pub fn iter(&self) -> impl Iterator<Item = (&CalendarKey, &[TimeWindow])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of stored windows across all keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl FromIterator<(CalendarKey, TimeWindow)> for AvailabilityCalendar {
    fn from_iter<I: IntoIterator<Item = (CalendarKey, TimeWindow)>>(iter: I) -> Self {
        let mut calendar = AvailabilityCalendar::new();
        for (key, window) in iter {
            calendar.push(key, window);
        }
        calendar
    }
}

impl TryFrom<BTreeMap<String, Vec<TimeWindow>>> for AvailabilityCalendar {
    type Error = EngineError;

    /// Keys naming the same day (`"Monday"` / `"monday"`, `"2025-6-1"` /
    /// `"2025-06-01"`) are merged in the raw map's key order. A stored window
    /// with `start >= end` is rejected.
    fn try_from(raw: BTreeMap<String, Vec<TimeWindow>>) -> Result<Self> {
        let mut entries: BTreeMap<CalendarKey, Vec<TimeWindow>> = BTreeMap::new();
        for (raw_key, windows) in raw {
            let key = raw_key.parse::<CalendarKey>()?;
            if let Some(bad) = windows.iter().find(|w| !w.is_valid()) {
                return Err(EngineError::InvalidStoredWindow {
                    key: raw_key,
                    window: bad.to_string(),
                });
            }
            entries.entry(key).or_default().extend(windows);
        }
        Ok(Self { entries })
    }
}

impl From<AvailabilityCalendar> for BTreeMap<String, Vec<TimeWindow>> {
    fn from(calendar: AvailabilityCalendar) -> Self {
        calendar
            .entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}
