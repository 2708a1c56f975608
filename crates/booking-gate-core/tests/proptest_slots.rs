// crates/booking-gate-core/tests/proptest_slots.rs
// ============================================================================
// Module: Slot Generator Property-Based Tests
// Description: Property tests for candidate generation invariants.
// Purpose: Detect grid, lead-time, and determinism violations across wide inputs.
// ============================================================================

//! Property-based tests for slot generation invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use booking_gate_core::BookingParams;
use booking_gate_core::BreakHandling;
use booking_gate_core::DurationRule;
use booking_gate_core::EvaluationInstant;
use booking_gate_core::FinishConstraints;
use booking_gate_core::Overbooking;
use booking_gate_core::StartWindow;
use booking_gate_core::TimeOfDay;
use booking_gate_core::WeekdayRules;
use booking_gate_core::generate_candidate_slots;
use proptest::prelude::*;
use time::Duration;
use time::macros::date;

/// Builds parameters from generated knobs, keeping every weekday bookable.
fn params_with(granularity: u16, lead: u16, horizon: u16, latest_start: u16) -> BookingParams {
    BookingParams {
        slot_granularity_min: granularity,
        min_lead_time_min: lead,
        max_horizon_days: horizon,
        buffer_before_min: 0,
        buffer_after_min: 0,
        duration_windows: vec![DurationRule {
            min_duration: 0,
            max_duration: 240,
            start_windows: vec![StartWindow {
                label: "geral".to_string(),
                latest_start: TimeOfDay::from_minute_of_day(latest_start).unwrap(),
            }],
        }],
        finish_constraints: FinishConstraints {
            must_finish_before_shift_end: false,
            respect_breaks: BreakHandling::Merge,
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

proptest! {
    #[test]
    fn candidates_always_sit_on_the_granularity_grid(
        granularity in 5u16..=120,
        lead in 0u16..=600,
        latest_start in 0u16..1440,
        now_minute in 0u16..1440,
        day_ahead in 0i64..=14,
    ) {
        let params = params_with(granularity, lead, 30, latest_start);
        let today = date!(2025 - 06 - 02);
        let now = EvaluationInstant::new(today, TimeOfDay::from_minute_of_day(now_minute).unwrap());
        let date = today + Duration::days(day_ahead);

        for slot in &generate_candidate_slots(&params, date, 45, &now) {
            prop_assert_eq!(slot.minute_of_day() % granularity, 0);
        }
    }

    #[test]
    fn candidates_are_sorted_deduplicated_and_bounded(
        granularity in 5u16..=120,
        latest_start in 0u16..1440,
    ) {
        let params = params_with(granularity, 0, 30, latest_start);
        let today = date!(2025 - 06 - 02);
        let now = EvaluationInstant::new(today, TimeOfDay::MIDNIGHT);

        let slots: Vec<TimeOfDay> =
            generate_candidate_slots(&params, today, 45, &now).iter().collect();
        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        if let Some(last) = slots.last() {
            prop_assert!(last.minute_of_day() <= latest_start);
        }
    }

    #[test]
    fn generation_is_idempotent(
        granularity in 5u16..=120,
        lead in 0u16..=600,
        latest_start in 0u16..1440,
        now_minute in 0u16..1440,
    ) {
        let params = params_with(granularity, lead, 30, latest_start);
        let today = date!(2025 - 06 - 02);
        let now = EvaluationInstant::new(today, TimeOfDay::from_minute_of_day(now_minute).unwrap());

        let first: Vec<TimeOfDay> =
            generate_candidate_slots(&params, today, 45, &now).iter().collect();
        let second: Vec<TimeOfDay> =
            generate_candidate_slots(&params, today, 45, &now).iter().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn same_day_candidates_respect_the_lead_time(
        granularity in 5u16..=120,
        lead in 0u16..=600,
        now_minute in 0u16..1440,
    ) {
        let params = params_with(granularity, lead, 30, 1439);
        let today = date!(2025 - 06 - 02);
        let now = EvaluationInstant::new(today, TimeOfDay::from_minute_of_day(now_minute).unwrap());

        let floor = i32::from(now_minute) + i32::from(lead);
        for slot in &generate_candidate_slots(&params, today, 45, &now) {
            prop_assert!(i32::from(slot.minute_of_day()) >= floor);
        }
    }

    #[test]
    fn horizon_is_inclusive_and_sharp(horizon in 1u16..=60) {
        let params = params_with(15, 0, horizon, 1439);
        let today = date!(2025 - 06 - 02);
        let now = EvaluationInstant::new(today, TimeOfDay::MIDNIGHT);

        let at_horizon = today + Duration::days(i64::from(horizon));
        let past_horizon = today + Duration::days(i64::from(horizon) + 1);
        prop_assert!(!generate_candidate_slots(&params, at_horizon, 45, &now).is_empty());
        prop_assert!(generate_candidate_slots(&params, past_horizon, 45, &now).is_empty());
    }
}
