// crates/booking-gate-core/tests/resolver.rs
// ============================================================================
// Module: Policy Resolver Tests
// Description: Tests for effective-policy selection and tie-breaking.
// ============================================================================
//! ## Overview
//! Validates scope matching, specificity ordering, and deterministic
//! tie-breaking across the policy pool.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::collections::BTreeSet;

use booking_gate_core::BookingParams;
use booking_gate_core::BookingPolicy;
use booking_gate_core::BreakHandling;
use booking_gate_core::DurationRule;
use booking_gate_core::FinishConstraints;
use booking_gate_core::Overbooking;
use booking_gate_core::PolicyError;
use booking_gate_core::PolicyId;
use booking_gate_core::ProfessionalId;
use booking_gate_core::ResolutionContext;
use booking_gate_core::ScopeKind;
use booking_gate_core::ServiceId;
use booking_gate_core::StartWindow;
use booking_gate_core::Timestamp;
use booking_gate_core::WeekdayRules;
use booking_gate_core::resolve_effective_policy;
use time::macros::date;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Baseline scheduling parameters shared by resolver fixtures.
fn base_params() -> BookingParams {
    BookingParams {
        slot_granularity_min: 15,
        min_lead_time_min: 60,
        max_horizon_days: 30,
        buffer_before_min: 0,
        buffer_after_min: 0,
        duration_windows: vec![DurationRule {
            min_duration: 0,
            max_duration: 60,
            start_windows: vec![StartWindow {
                label: "geral".to_string(),
                latest_start: "18:00".parse().unwrap(),
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

/// Builds an active policy with the given scope and priority.
fn policy(id: i64, scope_type: ScopeKind, scope_id: Option<i64>, priority: u16) -> BookingPolicy {
    BookingPolicy {
        id: Some(PolicyId::new(id)),
        name: format!("policy-{id}"),
        scope_type,
        scope_id,
        priority,
        effective_from: None,
        effective_to: None,
        active: true,
        params: base_params(),
        updated_at: Some(Timestamp::from_unix_millis(1_000)),
    }
}

/// Default resolution context used across tests.
fn ctx() -> ResolutionContext {
    ResolutionContext {
        service_id: ServiceId::new(10),
        professional_id: ProfessionalId::new(7),
        on_date: date!(2025 - 06 - 02),
    }
}

// ============================================================================
// SECTION: Scope And Specificity
// ============================================================================

#[test]
fn professional_scope_beats_higher_priority_service_and_company() {
    let policies = vec![
        policy(1, ScopeKind::Company, None, 999),
        policy(2, ScopeKind::Service, Some(10), 999),
        policy(3, ScopeKind::Professional, Some(7), 0),
    ];

    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(3)));
}

#[test]
fn service_scope_beats_company_scope() {
    let policies =
        vec![policy(1, ScopeKind::Company, None, 999), policy(2, ScopeKind::Service, Some(10), 1)];

    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(2)));
}

#[test]
fn mismatched_scopes_fall_through_to_company() {
    let policies = vec![
        policy(1, ScopeKind::Company, None, 5),
        policy(2, ScopeKind::Service, Some(99), 999),
        policy(3, ScopeKind::Professional, Some(42), 999),
    ];

    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(1)));
}

#[test]
fn empty_pool_resolves_to_none() {
    let selected = resolve_effective_policy(&[], &ctx()).unwrap();
    assert!(selected.is_none());
}

// ============================================================================
// SECTION: Priority And Tie-Breaking
// ============================================================================

#[test]
fn higher_priority_wins_within_a_tier() {
    let policies =
        vec![policy(1, ScopeKind::Company, None, 10), policy(2, ScopeKind::Company, None, 20)];

    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(2)));
}

#[test]
fn priority_tie_breaks_on_most_recent_update() {
    let mut older = policy(1, ScopeKind::Company, None, 10);
    older.updated_at = Some(Timestamp::from_unix_millis(1_000));
    let mut newer = policy(2, ScopeKind::Company, None, 10);
    newer.updated_at = Some(Timestamp::from_unix_millis(2_000));

    let policies = [older, newer];
    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(2)));
}

#[test]
fn full_tie_breaks_on_lowest_id() {
    let policies =
        vec![policy(9, ScopeKind::Company, None, 10), policy(4, ScopeKind::Company, None, 10)];

    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(4)));
}

#[test]
fn missing_update_time_sorts_oldest() {
    let mut draftish = policy(1, ScopeKind::Company, None, 10);
    draftish.updated_at = None;
    let stamped = policy(2, ScopeKind::Company, None, 10);

    let policies = [draftish, stamped];
    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(2)));
}

// ============================================================================
// SECTION: Activity And Effective Windows
// ============================================================================

#[test]
fn inactive_policies_are_never_selected() {
    let mut inactive = policy(1, ScopeKind::Professional, Some(7), 999);
    inactive.active = false;
    let company = policy(2, ScopeKind::Company, None, 1);

    let policies = [inactive, company];
    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(2)));
}

#[test]
fn effective_window_bounds_are_inclusive() {
    let mut bounded = policy(1, ScopeKind::Company, None, 10);
    bounded.effective_from = Some(date!(2025 - 06 - 02));
    bounded.effective_to = Some(date!(2025 - 06 - 02));

    let selected = resolve_effective_policy(std::slice::from_ref(&bounded), &ctx()).unwrap();
    assert_eq!(selected.unwrap().id, Some(PolicyId::new(1)));
}

#[test]
fn expired_policies_are_skipped() {
    let mut expired = policy(1, ScopeKind::Company, None, 999);
    expired.effective_to = Some(date!(2025 - 06 - 01));
    let open = policy(2, ScopeKind::Company, None, 1);

    let policies = [expired, open];
    let selected = resolve_effective_policy(&policies, &ctx()).unwrap().unwrap();
    assert_eq!(selected.id, Some(PolicyId::new(2)));
}

#[test]
fn future_policies_are_skipped() {
    let mut future = policy(1, ScopeKind::Company, None, 999);
    future.effective_from = Some(date!(2025 - 06 - 03));

    let selected = resolve_effective_policy(std::slice::from_ref(&future), &ctx()).unwrap();
    assert!(selected.is_none());
}

// ============================================================================
// SECTION: Malformed Records
// ============================================================================

#[test]
fn malformed_scope_pairing_fails_resolution() {
    let malformed = policy(1, ScopeKind::Service, None, 10);

    let result = resolve_effective_policy(std::slice::from_ref(&malformed), &ctx());
    assert!(matches!(result, Err(PolicyError::ScopeIdMissing(ScopeKind::Service))));
}
