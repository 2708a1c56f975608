// crates/booking-gate-core/examples/minimal.rs
// ============================================================================
// Module: Booking Gate Minimal Example
// Description: Minimal end-to-end evaluation using the in-memory store.
// Purpose: Demonstrate day availability and request evaluation.
// Dependencies: booking-gate-core
// ============================================================================

//! ## Overview
//! Resolves a company policy, lists a day's candidate slots, and evaluates one
//! booking request using in-memory sources. This example is backend-agnostic
//! and suitable for quick verification.

use std::collections::BTreeSet;

use booking_gate_core::Appointment;
use booking_gate_core::AppointmentStatus;
use booking_gate_core::BookingEngine;
use booking_gate_core::BookingParams;
use booking_gate_core::BookingPolicy;
use booking_gate_core::BookingRequest;
use booking_gate_core::BreakHandling;
use booking_gate_core::DaySchedule;
use booking_gate_core::DurationRule;
use booking_gate_core::EvaluationInstant;
use booking_gate_core::FinishConstraints;
use booking_gate_core::InMemoryBookingStore;
use booking_gate_core::Overbooking;
use booking_gate_core::PolicyId;
use booking_gate_core::ProfessionalId;
use booking_gate_core::ResolutionContext;
use booking_gate_core::ScopeKind;
use booking_gate_core::ServiceId;
use booking_gate_core::StartWindow;
use booking_gate_core::TimeOfDay;
use booking_gate_core::Timestamp;
use booking_gate_core::WeekdayRules;
use time::macros::date;

/// Builds the demo company policy: 15-minute grid, one-hour lead.
fn build_policy() -> Result<BookingPolicy, Box<dyn std::error::Error>> {
    let policy = BookingPolicy {
        id: Some(PolicyId::new(1)),
        name: "companywide".to_string(),
        scope_type: ScopeKind::Company,
        scope_id: None,
        priority: 100,
        effective_from: None,
        effective_to: None,
        active: true,
        params: BookingParams {
            slot_granularity_min: 15,
            min_lead_time_min: 60,
            max_horizon_days: 30,
            buffer_before_min: 0,
            buffer_after_min: 10,
            duration_windows: vec![DurationRule {
                min_duration: 0,
                max_duration: 60,
                start_windows: vec![StartWindow {
                    label: "geral".to_string(),
                    latest_start: "18:00".parse()?,
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
        },
        updated_at: Some(Timestamp::from_unix_millis(1_000)),
    };
    policy.validate()?;
    Ok(policy)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let professional_id = ProfessionalId::new(7);
    let date = date!(2025 - 06 - 02);
    let store = InMemoryBookingStore::new()
        .with_policy(build_policy()?)
        .with_appointment(Appointment {
            professional_id,
            service_id: Some(ServiceId::new(10)),
            date,
            start: "10:00".parse()?,
            duration_min: 60,
            status: AppointmentStatus::Scheduled,
        })
        .with_schedule(professional_id, date, DaySchedule::new("20:00".parse::<TimeOfDay>()?));

    let engine = BookingEngine::default();
    let now = EvaluationInstant::new(date, "08:00".parse()?);
    let ctx = ResolutionContext {
        service_id: ServiceId::new(10),
        professional_id,
        on_date: date,
    };

    let availability = engine.day_availability_from(&store, &ctx, 45, &now)?;
    let decision = engine.evaluate_request_from(
        &store,
        &BookingRequest {
            service_id: ServiceId::new(10),
            professional_id,
            date,
            start: "11:15".parse()?,
            duration_min: 45,
        },
        &now,
    )?;

    let _ = (availability, decision);
    Ok(())
}
