// crates/booking-gate-core/src/runtime/validator.rs
// ============================================================================
// Module: Booking Gate Availability Validator
// Description: Candidate validation against shifts, breaks, and bookings.
// Purpose: Decide accept/reject with a precise reason for one candidate slot.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The validator runs the short-circuit decision sequence for one candidate:
//! finish constraint, break handling, then the overbooking count. The first
//! failing check wins and is reported as a machine-readable reason.
//!
//! Buffers widen intervals only for booking-versus-booking conflicts; break
//! and shift checks use the raw service interval.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Appointment;
use crate::core::BookingParams;
use crate::core::BookingRequest;
use crate::core::BreakHandling;
use crate::core::DaySchedule;
use crate::core::FinishConstraints;
use crate::core::RejectReason;
use crate::core::SlotVerdict;
use crate::core::TimeSpan;

// ============================================================================
// SECTION: Slot Validation
// ============================================================================

/// Validates a candidate slot against the professional's day.
///
/// The appointment snapshot may span several professionals and dates; only
/// non-cancelled records matching the candidate's professional and date
/// count toward the overbooking limit.
#[must_use]
pub fn validate_slot(
    request: &BookingRequest,
    params: &BookingParams,
    appointments: &[Appointment],
    schedule: &DaySchedule,
) -> SlotVerdict {
    let service = TimeSpan::from_start_duration(request.start, request.duration_min);

    if params.finish_constraints.must_finish_before_shift_end
        && service.end_min > i32::from(schedule.shift_end.minute_of_day())
    {
        return SlotVerdict::Rejected {
            reason: RejectReason::FinishesAfterShift,
        };
    }

    if let Some(reason) = break_conflict(&params.finish_constraints, service, &schedule.breaks) {
        return SlotVerdict::Rejected {
            reason,
        };
    }

    let effective = TimeSpan::new(
        service.start_min - i32::from(params.buffer_before_min),
        service.end_min + i32::from(params.buffer_after_min),
    );
    let limit = usize::from(params.overbooking.max_parallel_per_professional);
    let concurrent = appointments
        .iter()
        .filter(|appointment| appointment.professional_id == request.professional_id)
        .filter(|appointment| appointment.date == request.date)
        .filter(|appointment| appointment.status.counts_for_conflicts())
        .filter(|appointment| appointment.buffered_interval(params).overlaps(effective))
        .count();
    if concurrent >= limit {
        return SlotVerdict::Rejected {
            reason: RejectReason::Overbooked,
        };
    }

    SlotVerdict::Accepted
}

// ============================================================================
// SECTION: Break Handling
// ============================================================================

/// Applies the configured break-handling mode to the service interval.
fn break_conflict(
    constraints: &FinishConstraints,
    service: TimeSpan,
    breaks: &[TimeSpan],
) -> Option<RejectReason> {
    let violated = match constraints.respect_breaks {
        BreakHandling::Merge => false,
        BreakHandling::Respect => breaks.iter().any(|span| span.overlaps(service)),
        BreakHandling::Exception => {
            let budget = u32::from(constraints.break_exception_minutes);
            breaks.iter().any(|span| span.overlap_minutes(service) > budget)
        }
    };
    violated.then_some(RejectReason::BreakConflict)
}
