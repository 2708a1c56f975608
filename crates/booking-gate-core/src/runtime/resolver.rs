// crates/booking-gate-core/src/runtime/resolver.rs
// ============================================================================
// Module: Booking Gate Policy Resolver
// Description: Effective-policy selection across the scope hierarchy.
// Purpose: Pick the single policy governing a service, professional, and date.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The resolver filters the policy pool down to active records whose effective
//! window and scope match the request context, then selects one winner by
//! specificity, priority, last-update time, and identifier. Selection is total
//! and deterministic so repeated evaluations agree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Reverse;

use serde::Deserialize;
use serde::Serialize;
use time::Date;

use crate::core::BookingPolicy;
use crate::core::PolicyError;
use crate::core::PolicyId;
use crate::core::PolicyScope;
use crate::core::ProfessionalId;
use crate::core::ServiceId;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Resolution Context
// ============================================================================

/// Request context a policy must match to be considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    /// Service being booked.
    pub service_id: ServiceId,
    /// Professional performing the service.
    pub professional_id: ProfessionalId,
    /// Date the policy must be in effect on.
    pub on_date: Date,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Selects the single effective policy for the context, or `None` when no
/// policy matches.
///
/// Callers must treat `None` as "no policy configured" and apply their
/// configured fallback; it is not a rejection by itself.
///
/// # Errors
///
/// Returns [`PolicyError`] when a candidate policy violates the scope pairing
/// invariant; malformed records fail the resolution rather than being skipped.
pub fn resolve_effective_policy<'a>(
    policies: &'a [BookingPolicy],
    ctx: &ResolutionContext,
) -> Result<Option<&'a BookingPolicy>, PolicyError> {
    let mut best: Option<&BookingPolicy> = None;
    for policy in policies {
        if !policy.active || !policy.in_effect_on(ctx.on_date) {
            continue;
        }
        if !scope_matches(policy.scope()?, ctx) {
            continue;
        }
        best = match best {
            Some(incumbent) if selection_rank(incumbent) >= selection_rank(policy) => {
                Some(incumbent)
            }
            _ => Some(policy),
        };
    }
    Ok(best)
}

/// Returns true when the policy scope applies to the request context.
fn scope_matches(scope: PolicyScope, ctx: &ResolutionContext) -> bool {
    match scope {
        PolicyScope::Company => true,
        PolicyScope::Service(service_id) => service_id == ctx.service_id,
        PolicyScope::Professional(professional_id) => professional_id == ctx.professional_id,
    }
}

/// Total selection order: specificity, then priority, then most recent
/// update, then lowest identifier. Policies without an update time sort
/// oldest; unsaved drafts lose identifier ties.
fn selection_rank(policy: &BookingPolicy) -> (u8, u16, i64, Reverse<i64>) {
    (
        policy.scope_type.specificity(),
        policy.priority,
        policy.updated_at.map_or(i64::MIN, Timestamp::as_unix_millis),
        Reverse(policy.id.map_or(i64::MAX, PolicyId::get)),
    )
}
