//! Wall-clock times of day and the windows built from them.
//!
//! Times are stored as minutes since midnight so that overlap checks are plain
//! integer comparisons. No date or timezone is involved: a window means the
//! same thing on whichever day it is anchored to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A 24-hour `HH:MM` time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build a time from hour and minute, rejecting out-of-range values.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self(hour as u16 * 60 + minute as u16))
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidTime(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A start/end pair of times on a single day.
///
/// `start < end` is checked wherever windows enter the engine: when a slot
/// or a calendar is parsed, and when a proposal is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// True when the window has positive length.
    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        overlaps(self.start_time, self.end_time, other.start_time, other.end_time)
    }

    /// Length of the shared part of two windows, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &TimeWindow) -> u16 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start_time.max(other.start_time);
        let end = self.end_time.min(other.end_time);
        end.minute_of_day().saturating_sub(start.minute_of_day())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}

/// Half-open interval intersection on the same day.
///
/// Two windows overlap iff `a_start < b_end && a_end > b_start`. A window that
/// ends exactly when another begins is NOT an overlap.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < b_end && a_end > b_start
}
