// crates/booking-gate-core/tests/validator.rs
// ============================================================================
// Module: Availability Validator Tests
// Description: Tests for finish constraints, break handling, and overbooking.
// ============================================================================
//! ## Overview
//! Validates the short-circuit decision sequence for candidate slots against
//! shifts, breaks, and the appointment snapshot.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::collections::BTreeSet;

use booking_gate_core::Appointment;
use booking_gate_core::AppointmentStatus;
use booking_gate_core::BookingParams;
use booking_gate_core::BookingRequest;
use booking_gate_core::BreakHandling;
use booking_gate_core::DaySchedule;
use booking_gate_core::DurationRule;
use booking_gate_core::FinishConstraints;
use booking_gate_core::Overbooking;
use booking_gate_core::ProfessionalId;
use booking_gate_core::RejectReason;
use booking_gate_core::ServiceId;
use booking_gate_core::SlotVerdict;
use booking_gate_core::StartWindow;
use booking_gate_core::TimeOfDay;
use booking_gate_core::TimeSpan;
use booking_gate_core::WeekdayRules;
use booking_gate_core::validate_slot;
use time::Date;
use time::macros::date;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Baseline parameters with a 20:00 shift and strict break handling.
fn base_params() -> BookingParams {
    BookingParams {
        slot_granularity_min: 15,
        min_lead_time_min: 0,
        max_horizon_days: 30,
        buffer_before_min: 0,
        buffer_after_min: 0,
        duration_windows: vec![DurationRule {
            min_duration: 0,
            max_duration: 120,
            start_windows: vec![StartWindow {
                label: "geral".to_string(),
                latest_start: "19:00".parse().unwrap(),
            }],
        }],
        finish_constraints: FinishConstraints {
            must_finish_before_shift_end: true,
            respect_breaks: BreakHandling::Respect,
            break_exception_minutes: 0,
        },
        weekday_rules: WeekdayRules {
            allowed_dow: (0..=6).collect(),
            blackout_dates: BTreeSet::new(),
        },
        overbooking: Overbooking {
            max_parallel_per_professional: 1,
        },
    }
}

/// Parses an `HH:MM` literal.
fn t(text: &str) -> TimeOfDay {
    text.parse().unwrap()
}

/// Fixture date shared by validator tests.
fn day() -> Date {
    date!(2025 - 06 - 02)
}

/// Builds a candidate request for the fixture professional.
fn candidate(start: &str, duration_min: u16) -> BookingRequest {
    BookingRequest {
        service_id: ServiceId::new(10),
        professional_id: ProfessionalId::new(7),
        date: day(),
        start: t(start),
        duration_min,
    }
}

/// Builds a scheduled appointment for the given professional.
fn appointment(professional: i64, start: &str, duration_min: u16) -> Appointment {
    Appointment {
        professional_id: ProfessionalId::new(professional),
        service_id: Some(ServiceId::new(10)),
        date: day(),
        start: t(start),
        duration_min,
        status: AppointmentStatus::Scheduled,
    }
}

/// Schedule ending at 20:00 with no breaks.
fn open_schedule() -> DaySchedule {
    DaySchedule::new(t("20:00"))
}

/// Asserts that the verdict rejects with the given reason.
fn assert_rejected(verdict: SlotVerdict, expected: RejectReason) {
    assert_eq!(
        verdict,
        SlotVerdict::Rejected {
            reason: expected,
        }
    );
}

// ============================================================================
// SECTION: Finish Constraints
// ============================================================================

#[test]
fn service_ending_at_shift_end_is_accepted() {
    let verdict = validate_slot(&candidate("19:00", 60), &base_params(), &[], &open_schedule());
    assert!(verdict.is_accepted());
}

#[test]
fn service_running_past_shift_end_is_rejected() {
    let verdict = validate_slot(&candidate("19:15", 60), &base_params(), &[], &open_schedule());
    assert_rejected(verdict, RejectReason::FinishesAfterShift);
}

#[test]
fn shift_end_is_ignored_when_the_constraint_is_off() {
    let mut params = base_params();
    params.finish_constraints.must_finish_before_shift_end = false;

    let verdict = validate_slot(&candidate("19:30", 60), &params, &[], &open_schedule());
    assert!(verdict.is_accepted());
}

// ============================================================================
// SECTION: Break Handling
// ============================================================================

#[test]
fn respect_mode_rejects_any_break_overlap() {
    let schedule = open_schedule().with_break(TimeSpan::new(720, 780));

    let verdict = validate_slot(&candidate("12:45", 30), &base_params(), &[], &schedule);
    assert_rejected(verdict, RejectReason::BreakConflict);
}

#[test]
fn respect_mode_accepts_candidates_adjacent_to_breaks() {
    let schedule = open_schedule().with_break(TimeSpan::new(720, 780));

    let verdict = validate_slot(&candidate("13:00", 30), &base_params(), &[], &schedule);
    assert!(verdict.is_accepted());
}

#[test]
fn exception_mode_tolerates_overlap_up_to_the_budget() {
    let mut params = base_params();
    params.finish_constraints.respect_breaks = BreakHandling::Exception;
    params.finish_constraints.break_exception_minutes = 30;
    let schedule = open_schedule().with_break(TimeSpan::new(720, 780));

    // Overlap with the 12:00-13:00 break is exactly 30 minutes.
    let verdict = validate_slot(&candidate("12:30", 60), &params, &[], &schedule);
    assert!(verdict.is_accepted());
}

#[test]
fn exception_mode_rejects_overlap_past_the_budget() {
    let mut params = base_params();
    params.finish_constraints.respect_breaks = BreakHandling::Exception;
    params.finish_constraints.break_exception_minutes = 30;
    let schedule = open_schedule().with_break(TimeSpan::new(720, 780));

    // Overlap with the 12:00-13:00 break is 31 minutes.
    let verdict = validate_slot(&candidate("12:29", 60), &params, &[], &schedule);
    assert_rejected(verdict, RejectReason::BreakConflict);
}

#[test]
fn merge_mode_ignores_breaks_entirely() {
    let mut params = base_params();
    params.finish_constraints.respect_breaks = BreakHandling::Merge;
    let schedule = open_schedule().with_break(TimeSpan::new(720, 780));

    let verdict = validate_slot(&candidate("12:00", 60), &params, &[], &schedule);
    assert!(verdict.is_accepted());
}

// ============================================================================
// SECTION: Overbooking
// ============================================================================

#[test]
fn single_parallel_limit_rejects_overlapping_second_booking() {
    let existing = vec![appointment(7, "10:00", 60)];

    let verdict = validate_slot(&candidate("10:30", 45), &base_params(), &existing, &open_schedule());
    assert_rejected(verdict, RejectReason::Overbooked);
}

#[test]
fn parallel_limit_of_two_admits_one_overlap_and_rejects_a_third() {
    let mut params = base_params();
    params.overbooking.max_parallel_per_professional = 2;

    let one = vec![appointment(7, "10:00", 60)];
    let verdict = validate_slot(&candidate("10:30", 45), &params, &one, &open_schedule());
    assert!(verdict.is_accepted());

    let two = vec![appointment(7, "10:00", 60), appointment(7, "10:15", 60)];
    let verdict = validate_slot(&candidate("10:30", 45), &params, &two, &open_schedule());
    assert_rejected(verdict, RejectReason::Overbooked);
}

#[test]
fn cancelled_appointments_release_their_slot() {
    let mut cancelled = appointment(7, "10:00", 60);
    cancelled.status = AppointmentStatus::Cancelled;

    let verdict =
        validate_slot(&candidate("10:30", 45), &base_params(), &[cancelled], &open_schedule());
    assert!(verdict.is_accepted());
}

#[test]
fn other_professionals_do_not_count_toward_the_limit() {
    let existing = vec![appointment(8, "10:00", 60)];

    let verdict = validate_slot(&candidate("10:30", 45), &base_params(), &existing, &open_schedule());
    assert!(verdict.is_accepted());
}

#[test]
fn other_dates_do_not_count_toward_the_limit() {
    let mut existing = appointment(7, "10:00", 60);
    existing.date = date!(2025 - 06 - 03);

    let verdict =
        validate_slot(&candidate("10:30", 45), &base_params(), &[existing], &open_schedule());
    assert!(verdict.is_accepted());
}

#[test]
fn back_to_back_bookings_do_not_overlap() {
    let existing = vec![appointment(7, "10:00", 60)];

    let verdict = validate_slot(&candidate("11:00", 45), &base_params(), &existing, &open_schedule());
    assert!(verdict.is_accepted());
}

// ============================================================================
// SECTION: Buffers
// ============================================================================

#[test]
fn buffers_widen_the_conflict_interval() {
    let mut params = base_params();
    params.buffer_after_min = 15;

    let existing = vec![appointment(7, "10:00", 60)];

    // The existing booking's buffered interval runs to 11:15, so a start at
    // 11:10 conflicts while 11:15 does not.
    let verdict = validate_slot(&candidate("11:10", 30), &params, &existing, &open_schedule());
    assert_rejected(verdict, RejectReason::Overbooked);

    let verdict = validate_slot(&candidate("11:15", 30), &params, &existing, &open_schedule());
    assert!(verdict.is_accepted());
}

#[test]
fn breaks_are_checked_against_the_raw_service_interval() {
    let mut params = base_params();
    params.buffer_before_min = 30;
    let schedule = open_schedule().with_break(TimeSpan::new(720, 780));

    // The buffer reaches into the 12:00-13:00 break but the service itself
    // starts at 13:00; buffers only apply to booking-versus-booking
    // conflicts.
    let verdict = validate_slot(&candidate("13:00", 30), &params, &[], &schedule);
    assert!(verdict.is_accepted());
}
