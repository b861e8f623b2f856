//! WASM bindings for availability-engine.
//!
//! Exposes proposal expansion and conflict detection to the availability form
//! via `wasm-bindgen`. All complex types are passed as JSON strings using the
//! same camelCase shapes the form already stores.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::{AvailabilityCalendar, AvailabilityProposal, TimeOfDay, TimeSlot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_time(s: &str) -> Result<TimeOfDay, JsValue> {
    s.parse().map_err(|e: availability_engine::EngineError| JsValue::from_str(&e.to_string()))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand a proposal into the slots that would be saved.
///
/// `proposal_json` is `{startTime, endTime, mode, ...}`. Returns a JSON array of
/// slots. Inverted times are an error here; use `evaluateProposal` to get them
/// as a report message instead.
#[wasm_bindgen(js_name = "expandProposal")]
pub fn expand_proposal(proposal_json: &str) -> Result<String, JsValue> {
    let proposal: AvailabilityProposal = from_json("proposal", proposal_json)?;
    let slots = availability_engine::expand_proposal(&proposal)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&slots)
}

/// Check already-expanded slots against a calendar.
///
/// Returns a JSON array of findings, each `{kind, message, detail?}`.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(slots_json: &str, calendar_json: &str) -> Result<String, JsValue> {
    let slots: Vec<TimeSlot> = from_json("slots", slots_json)?;
    let calendar: AvailabilityCalendar = from_json("calendar", calendar_json)?;

    let report = availability_engine::find_conflicts(&slots, &calendar);
    to_json(&report)
}

/// Expand a proposal and check it in one call.
///
/// Returns `{slots, report}`. The form saves `slots` only when `report` is empty.
#[wasm_bindgen(js_name = "evaluateProposal")]
pub fn evaluate_proposal(proposal_json: &str, calendar_json: &str) -> Result<String, JsValue> {
    let proposal: AvailabilityProposal = from_json("proposal", proposal_json)?;
    let calendar: AvailabilityCalendar = from_json("calendar", calendar_json)?;

    let evaluation = availability_engine::evaluate(&proposal, &calendar);
    to_json(&evaluation)
}

/// Merge saved slots into a calendar, returning the updated calendar JSON.
#[wasm_bindgen(js_name = "applySlots")]
pub fn apply_slots(slots_json: &str, calendar_json: &str) -> Result<String, JsValue> {
    let slots: Vec<TimeSlot> = from_json("slots", slots_json)?;
    let calendar: AvailabilityCalendar = from_json("calendar", calendar_json)?;

    to_json(&calendar.with_slots(&slots))
}

/// Half-open overlap test on `HH:MM` strings.
#[wasm_bindgen]
pub fn overlaps(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Result<bool, JsValue> {
    Ok(availability_engine::overlaps(
        parse_time(a_start)?,
        parse_time(a_end)?,
        parse_time(b_start)?,
        parse_time(b_end)?,
    ))
}
