// crates/booking-gate-core/src/runtime/engine.rs
// ============================================================================
// Module: Booking Gate Engine
// Description: Resolution, generation, and validation composed per request.
// Purpose: Provide the single canonical evaluation path for booking requests.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The engine is the canonical execution path for Booking Gate. All callers
//! (HTTP layers, admin UIs, batch jobs) should evaluate through these methods
//! so fallback handling and decision records stay uniform. The engine is pure:
//! policies, appointment snapshots, schedules, and the evaluation instant all
//! arrive as inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Appointment;
use crate::core::BookingDecision;
use crate::core::BookingPolicy;
use crate::core::BookingRequest;
use crate::core::DayAvailability;
use crate::core::DaySchedule;
use crate::core::DecisionOutcome;
use crate::core::EvaluationInstant;
use crate::core::FallbackMode;
use crate::core::HashError;
use crate::core::PolicyError;
use crate::core::RejectReason;
use crate::core::SlotVerdict;
use crate::interfaces::AppointmentSource;
use crate::interfaces::PolicySource;
use crate::interfaces::ScheduleSource;
use crate::interfaces::StoreError;
use crate::runtime::resolver::ResolutionContext;
use crate::runtime::resolver::resolve_effective_policy;
use crate::runtime::slots::day_gate;
use crate::runtime::slots::generate_candidate_slots;
use crate::runtime::slots::lead_time_ok;
use crate::runtime::slots::start_on_grid;
use crate::runtime::slots::window_admits;
use crate::runtime::validator::validate_slot;

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

/// Configuration for the booking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Behavior when no effective policy matches a request.
    pub fallback: FallbackMode,
}

// ============================================================================
// SECTION: Engine Errors
// ============================================================================

/// Errors raised while evaluating availability or booking requests.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A policy record violated a validation invariant.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// Fingerprinting the effective policy failed.
    #[error(transparent)]
    Fingerprint(#[from] HashError),
    /// A storage source failed to load inputs.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Booking Engine
// ============================================================================

/// Evaluates booking requests and day availability under booking policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingEngine {
    /// Engine configuration.
    config: EngineConfig,
}

impl BookingEngine {
    /// Creates an engine with the provided configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the accepted start times for one date.
    ///
    /// Resolves the effective policy, generates candidates, and validates
    /// each against the appointment snapshot and day schedule. When no
    /// policy matches, the configured fallback outcome is returned instead
    /// of an empty governed list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when a policy record is malformed or cannot
    /// be fingerprinted.
    pub fn day_availability(
        &self,
        policies: &[BookingPolicy],
        ctx: &ResolutionContext,
        service_duration_min: u16,
        now: &EvaluationInstant,
        appointments: &[Appointment],
        schedule: &DaySchedule,
    ) -> Result<DayAvailability, EngineError> {
        let Some(policy) = resolve_effective_policy(policies, ctx)? else {
            return Ok(match self.config.fallback {
                FallbackMode::Unrestricted => DayAvailability::Unconstrained,
                FallbackMode::Blocked => DayAvailability::Blocked,
            });
        };

        let candidates =
            generate_candidate_slots(&policy.params, ctx.on_date, service_duration_min, now);
        let mut slots = Vec::new();
        for start in &candidates {
            let request = BookingRequest {
                service_id: ctx.service_id,
                professional_id: ctx.professional_id,
                date: ctx.on_date,
                start,
                duration_min: service_duration_min,
            };
            if validate_slot(&request, &policy.params, appointments, schedule).is_accepted() {
                slots.push(start);
            }
        }

        Ok(DayAvailability::Governed {
            policy_id: policy.id,
            policy_fingerprint: policy.fingerprint()?,
            slots,
        })
    }

    /// Evaluates one requested appointment to an auditable decision.
    ///
    /// The decision sequence mirrors candidate generation: date-level gates,
    /// lead time, window membership, then the availability validator. The
    /// first failing check wins.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when a policy record is malformed or cannot
    /// be fingerprinted.
    pub fn evaluate_request(
        &self,
        policies: &[BookingPolicy],
        request: &BookingRequest,
        now: &EvaluationInstant,
        appointments: &[Appointment],
        schedule: &DaySchedule,
    ) -> Result<BookingDecision, EngineError> {
        let ctx = ResolutionContext {
            service_id: request.service_id,
            professional_id: request.professional_id,
            on_date: request.date,
        };
        let Some(policy) = resolve_effective_policy(policies, &ctx)? else {
            return Ok(BookingDecision {
                outcome: DecisionOutcome::NoPolicy {
                    fallback: self.config.fallback,
                },
                policy_id: None,
                policy_fingerprint: None,
                request: *request,
            });
        };

        let outcome = Self::request_outcome(policy, request, now, appointments, schedule);
        Ok(BookingDecision {
            outcome,
            policy_id: policy.id,
            policy_fingerprint: Some(policy.fingerprint()?),
            request: *request,
        })
    }

    /// Computes the accepted start times using storage sources.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when loading inputs fails or a policy record
    /// is malformed.
    pub fn day_availability_from<S>(
        &self,
        source: &S,
        ctx: &ResolutionContext,
        service_duration_min: u16,
        now: &EvaluationInstant,
    ) -> Result<DayAvailability, EngineError>
    where
        S: PolicySource + AppointmentSource + ScheduleSource,
    {
        let policies = source.policies()?;
        let appointments = source.appointments_for(ctx.professional_id, ctx.on_date)?;
        let schedule = source.day_schedule(ctx.professional_id, ctx.on_date)?;
        self.day_availability(&policies, ctx, service_duration_min, now, &appointments, &schedule)
    }

    /// Evaluates one requested appointment using storage sources.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when loading inputs fails or a policy record
    /// is malformed.
    pub fn evaluate_request_from<S>(
        &self,
        source: &S,
        request: &BookingRequest,
        now: &EvaluationInstant,
    ) -> Result<BookingDecision, EngineError>
    where
        S: PolicySource + AppointmentSource + ScheduleSource,
    {
        let policies = source.policies()?;
        let appointments = source.appointments_for(request.professional_id, request.date)?;
        let schedule = source.day_schedule(request.professional_id, request.date)?;
        self.evaluate_request(&policies, request, now, &appointments, &schedule)
    }

    /// Runs the ordered request checks under an effective policy.
    fn request_outcome(
        policy: &BookingPolicy,
        request: &BookingRequest,
        now: &EvaluationInstant,
        appointments: &[Appointment],
        schedule: &DaySchedule,
    ) -> DecisionOutcome {
        let params = &policy.params;
        if let Err(reason) = day_gate(params, request.date, now.date) {
            return DecisionOutcome::Rejected {
                reason,
            };
        }
        if !lead_time_ok(params, request.date, request.start, now) {
            return DecisionOutcome::Rejected {
                reason: RejectReason::BeforeLeadTime,
            };
        }
        let Some(rule) = params.matching_rule(request.duration_min) else {
            return DecisionOutcome::Rejected {
                reason: RejectReason::OutsideWindow,
            };
        };
        if !start_on_grid(params, request.start) || !window_admits(rule, request.start) {
            return DecisionOutcome::Rejected {
                reason: RejectReason::OutsideWindow,
            };
        }
        match validate_slot(request, params, appointments, schedule) {
            SlotVerdict::Accepted => DecisionOutcome::Accepted,
            SlotVerdict::Rejected {
                reason,
            } => DecisionOutcome::Rejected {
                reason,
            },
        }
    }
}
