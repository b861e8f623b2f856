//! Tests for the availability form reducer.

use std::sync::Arc;

use availability_engine::{
    reduce, AvailabilityCalendar, DayOfWeek, FormEvent, FormState, ModeSelection, TimeOfDay,
};
use chrono::NaiveDate;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> Option<TimeOfDay> {
    Some(s.parse().unwrap())
}

fn date(s: &str) -> Option<NaiveDate> {
    Some(s.parse().unwrap())
}

fn calendar(json: &str) -> Arc<AvailabilityCalendar> {
    Arc::new(serde_json::from_str(json).unwrap())
}

fn run(state: FormState, events: Vec<FormEvent>) -> FormState {
    events.into_iter().fold(state, |s, e| reduce(&s, e))
}

fn saturday_booked() -> FormState {
    FormState::with_calendar(calendar(
        r#"{"2025-06-28":[{"startTime":"15:00","endTime":"17:00"}],"monday":[{"startTime":"10:00","endTime":"12:00"}]}"#,
    ))
}

// ── Evaluation on input changes ─────────────────────────────────────────────

#[test]
fn fresh_form_cannot_save() {
    let state = FormState::default();
    assert!(!state.can_save());
    assert!(state.messages().is_empty());
}

#[test]
fn filling_a_clean_single_date_enables_save() {
    let state = run(
        saturday_booked(),
        vec![
            FormEvent::StartTimeChanged(t("18:00")),
            FormEvent::EndTimeChanged(t("20:00")),
            FormEvent::DateChanged(date("2025-06-28")),
        ],
    );

    assert!(state.messages().is_empty());
    assert_eq!(state.evaluation.slots.len(), 1);
    assert!(state.can_save());
}

#[test]
fn conflicting_selection_disables_save_and_clearing_it_reenables() {
    let conflicted = run(
        saturday_booked(),
        vec![
            FormEvent::StartTimeChanged(t("14:00")),
            FormEvent::EndTimeChanged(t("16:00")),
            FormEvent::DateChanged(date("2025-06-28")),
        ],
    );
    assert_eq!(
        conflicted.messages(),
        vec!["Conflict on Saturday, June 28, 2025: 14:00-16:00 overlaps with existing 15:00-17:00"]
    );
    assert!(!conflicted.can_save());

    let cleared = reduce(&conflicted, FormEvent::EndTimeChanged(t("15:00")));
    assert!(cleared.messages().is_empty());
    assert!(cleared.can_save());
}

#[test]
fn inverted_times_show_validation_message() {
    let state = run(
        FormState::default(),
        vec![
            FormEvent::StartTimeChanged(t("17:00")),
            FormEvent::EndTimeChanged(t("09:00")),
        ],
    );

    assert_eq!(state.messages(), vec!["End time must be after start time"]);
    assert!(state.evaluation.slots.is_empty());
}

#[test]
fn toggling_weekdays_adds_and_removes() {
    let state = run(
        saturday_booked(),
        vec![
            FormEvent::ModeChanged(ModeSelection::Recurring),
            FormEvent::StartTimeChanged(t("09:00")),
            FormEvent::EndTimeChanged(t("11:00")),
            FormEvent::WeekdayToggled(DayOfWeek::Monday),
            FormEvent::WeekdayToggled(DayOfWeek::Tuesday),
        ],
    );
    assert_eq!(state.weekdays, vec![DayOfWeek::Monday, DayOfWeek::Tuesday]);
    assert_eq!(
        state.messages(),
        vec!["Conflict on Monday: 09:00-11:00 overlaps with existing 10:00-12:00"]
    );

    let state = reduce(&state, FormEvent::WeekdayToggled(DayOfWeek::Monday));
    assert_eq!(state.weekdays, vec![DayOfWeek::Tuesday]);
    assert!(state.can_save());
}

#[test]
fn switching_mode_reevaluates_against_the_new_mode() {
    let state = run(
        saturday_booked(),
        vec![
            FormEvent::StartTimeChanged(t("14:00")),
            FormEvent::EndTimeChanged(t("16:00")),
            FormEvent::DateChanged(date("2025-06-28")),
            FormEvent::ModeChanged(ModeSelection::Range),
        ],
    );

    // No range bounds yet: nothing to save, nothing reported.
    assert!(state.messages().is_empty());
    assert!(!state.can_save());
}

#[test]
fn calendar_reload_reevaluates() {
    let state = run(
        FormState::default(),
        vec![
            FormEvent::StartTimeChanged(t("14:00")),
            FormEvent::EndTimeChanged(t("16:00")),
            FormEvent::DateChanged(date("2025-06-28")),
        ],
    );
    assert!(state.can_save());

    let state = reduce(&state, FormEvent::CalendarLoaded(saturday_booked().calendar));
    assert!(!state.can_save());
    assert_eq!(state.messages().len(), 1);
}

// ── Save lifecycle ──────────────────────────────────────────────────────────

fn ready_to_save() -> FormState {
    run(
        saturday_booked(),
        vec![
            FormEvent::StartTimeChanged(t("18:00")),
            FormEvent::EndTimeChanged(t("20:00")),
            FormEvent::DateChanged(date("2025-06-28")),
        ],
    )
}

#[test]
fn save_request_marks_saving_and_blocks_a_second_save() {
    let saving = reduce(&ready_to_save(), FormEvent::SaveRequested);
    assert!(saving.saving);
    assert!(!saving.can_save());

    let again = reduce(&saving, FormEvent::SaveRequested);
    assert_eq!(again, saving);
}

#[test]
fn save_request_is_ignored_while_conflicted() {
    let conflicted = reduce(&ready_to_save(), FormEvent::StartTimeChanged(t("16:00")));
    assert!(!conflicted.can_save());

    let next = reduce(&conflicted, FormEvent::SaveRequested);
    assert!(!next.saving);
}

#[test]
fn save_success_installs_refreshed_calendar_and_clears_selection() {
    let saving = reduce(&ready_to_save(), FormEvent::SaveRequested);
    let refreshed = Arc::new(saving.calendar.with_slots(&saving.evaluation.slots));

    let done = reduce(&saving, FormEvent::SaveSucceeded(refreshed.clone()));

    assert!(!done.saving);
    assert_eq!(done.calendar, refreshed);
    assert_eq!(done.start_time, None);
    assert_eq!(done.date, None);
    assert!(done.evaluation.slots.is_empty());

    // The just-saved window now conflicts with itself.
    let retry = run(
        done,
        vec![
            FormEvent::StartTimeChanged(t("18:00")),
            FormEvent::EndTimeChanged(t("20:00")),
            FormEvent::DateChanged(date("2025-06-28")),
        ],
    );
    assert_eq!(retry.messages().len(), 1);
}

#[test]
fn save_failure_keeps_selection_and_records_error() {
    let saving = reduce(&ready_to_save(), FormEvent::SaveRequested);

    let failed = reduce(&saving, FormEvent::SaveFailed("network down".to_string()));

    assert!(!failed.saving);
    assert_eq!(failed.save_error.as_deref(), Some("network down"));
    assert!(failed.can_save());
}

#[test]
fn reset_is_ignored_while_saving() {
    let saving = reduce(&ready_to_save(), FormEvent::SaveRequested);

    let after = reduce(&saving, FormEvent::Reset);

    assert_eq!(after, saving);
    assert!(after.saving);
    assert_eq!(after.evaluation.slots.len(), 1);
}

#[test]
fn reset_clears_selection_when_idle() {
    let cleared = reduce(&ready_to_save(), FormEvent::Reset);

    assert_eq!(cleared.start_time, None);
    assert!(cleared.evaluation.slots.is_empty());
    assert_eq!(cleared.mode, ModeSelection::Single);
}

#[test]
fn reduce_leaves_input_state_untouched() {
    let before = ready_to_save();
    let snapshot = before.clone();

    let _ = reduce(&before, FormEvent::Reset);

    assert_eq!(before, snapshot);
}
