//! Booking status workflow shown on the venue activity view.
//!
//! ```text
//! pending ──confirm──▶ confirmed ──complete──▶ completed
//!    │                    │
//!    ├──decline──▶ declined
//!    └──cancel───▶ cancelled ◀──cancel──┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Confirm,
    Decline,
    Cancel,
    Complete,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Cannot {action} a booking that is {from}")]
    IllegalTransition {
        from: BookingStatus,
        action: BookingAction,
    },
}

impl BookingStatus {
    /// Apply `action`, returning the new status.
    pub fn apply(self, action: BookingAction) -> Result<BookingStatus, BookingError> {
        use BookingAction::*;
        use BookingStatus::*;

        match (self, action) {
            (Pending, Confirm) => Ok(Confirmed),
            (Pending, Decline) => Ok(Declined),
            (Pending | Confirmed, Cancel) => Ok(Cancelled),
            (Confirmed, Complete) => Ok(Completed),
            (from, action) => Err(BookingError::IllegalTransition { from, action }),
        }
    }

    /// Actions the venue view may offer for a booking in this status.
    pub fn available_actions(self) -> &'static [BookingAction] {
        match self {
            BookingStatus::Pending => &[
                BookingAction::Confirm,
                BookingAction::Decline,
                BookingAction::Cancel,
            ],
            BookingStatus::Confirmed => &[BookingAction::Complete, BookingAction::Cancel],
            BookingStatus::Declined | BookingStatus::Cancelled | BookingStatus::Completed => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.available_actions().is_empty()
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Declined => "Declined",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingAction::Confirm => "confirm",
            BookingAction::Decline => "decline",
            BookingAction::Cancel => "cancel",
            BookingAction::Complete => "complete",
        };
        f.write_str(s)
    }
}
