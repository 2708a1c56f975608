// crates/booking-gate-core/src/core/decision.rs
// ============================================================================
// Module: Booking Gate Decision Records
// Description: Reject reasons, verdicts, and auditable booking decisions.
// Purpose: Carry machine-readable outcomes from evaluation to the caller.
// Dependencies: crate::core::{hashing, identifiers, time}, serde, time
// ============================================================================

//! ## Overview
//! Every rejection carries an explicit reason code so the surrounding UI can
//! present a precise message; verdicts are never bare booleans. Decisions also
//! echo the evaluated candidate and the fingerprint of the effective policy so
//! the storage layer's transactional re-check can detect policy drift.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;

use crate::core::hashing::HashDigest;
use crate::core::identifiers::PolicyId;
use crate::core::identifiers::ProfessionalId;
use crate::core::identifiers::ServiceId;
use crate::core::time::TimeOfDay;

// ============================================================================
// SECTION: Reject Reasons
// ============================================================================

/// Machine-readable reason for rejecting a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Service would end after the professional's shift.
    FinishesAfterShift,
    /// Candidate interval conflicts with a break.
    BreakConflict,
    /// Parallel booking limit reached.
    Overbooked,
    /// Start time is not admitted by any start window for the duration.
    OutsideWindow,
    /// Date is an explicit blackout.
    BlackoutDate,
    /// Date's weekday is not bookable.
    DisallowedWeekday,
    /// Date is past the booking horizon or before today.
    BeyondHorizon,
    /// Start time is earlier than the minimum lead time allows.
    BeforeLeadTime,
}

// ============================================================================
// SECTION: Slot Verdicts
// ============================================================================

/// Verdict for a single candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotVerdict {
    /// Candidate is bookable.
    Accepted,
    /// Candidate is rejected with a reason code.
    Rejected {
        /// Machine-readable rejection reason.
        reason: RejectReason,
    },
}

impl SlotVerdict {
    /// Returns true when the verdict accepts the candidate.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

// ============================================================================
// SECTION: Booking Requests
// ============================================================================

/// A requested appointment evaluated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Requested service.
    pub service_id: ServiceId,
    /// Requested professional.
    pub professional_id: ProfessionalId,
    /// Requested calendar date.
    pub date: Date,
    /// Requested wall-clock start time.
    pub start: TimeOfDay,
    /// Service duration in minutes.
    pub duration_min: u16,
}

// ============================================================================
// SECTION: Fallback Mode
// ============================================================================

/// Behavior when no effective policy matches the request context.
///
/// The choice is a product decision carried as explicit configuration; it is
/// never embedded in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Absence of a policy permits any request.
    Unrestricted,
    /// Absence of a policy blocks all requests (fail closed).
    #[default]
    Blocked,
}

// ============================================================================
// SECTION: Booking Decisions
// ============================================================================

/// Outcome of evaluating a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Request is permitted under the effective policy.
    Accepted,
    /// Request is rejected with a reason code.
    Rejected {
        /// Machine-readable rejection reason.
        reason: RejectReason,
    },
    /// No effective policy matched; the configured fallback applies.
    NoPolicy {
        /// Fallback mode in force at evaluation time.
        fallback: FallbackMode,
    },
}

/// Auditable record of one booking-request evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDecision {
    /// Evaluation outcome.
    pub outcome: DecisionOutcome,
    /// Identifier of the effective policy, when one matched and is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<PolicyId>,
    /// Fingerprint of the effective policy, when one matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_fingerprint: Option<HashDigest>,
    /// The evaluated request, echoed for audit trails.
    pub request: BookingRequest,
}

impl BookingDecision {
    /// Returns true when the decision permits creating the appointment.
    #[must_use]
    pub const fn permits(&self) -> bool {
        match self.outcome {
            DecisionOutcome::Accepted => true,
            DecisionOutcome::Rejected {
                ..
            } => false,
            DecisionOutcome::NoPolicy {
                fallback,
            } => matches!(fallback, FallbackMode::Unrestricted),
        }
    }
}

// ============================================================================
// SECTION: Day Availability
// ============================================================================

/// Candidate start times for one professional, service, and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayAvailability {
    /// Slots computed under the effective policy.
    Governed {
        /// Identifier of the effective policy, when saved.
        policy_id: Option<PolicyId>,
        /// Fingerprint of the effective policy.
        policy_fingerprint: HashDigest,
        /// Accepted start times in ascending order.
        slots: Vec<TimeOfDay>,
    },
    /// No effective policy; booking is unconstrained by configuration.
    Unconstrained,
    /// No effective policy; booking is blocked by configuration.
    Blocked,
}

impl DayAvailability {
    /// Returns the accepted start times, empty for the no-policy outcomes.
    #[must_use]
    pub fn slots(&self) -> &[TimeOfDay] {
        match self {
            Self::Governed {
                slots, ..
            } => slots,
            Self::Unconstrained | Self::Blocked => &[],
        }
    }
}
