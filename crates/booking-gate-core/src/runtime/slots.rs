// crates/booking-gate-core/src/runtime/slots.rs
// ============================================================================
// Module: Booking Gate Slot Generator
// Description: Candidate start-time enumeration under an effective policy.
// Purpose: Produce ordered, granularity-aligned slot sequences per date.
// Dependencies: crate::core, time
// ============================================================================

//! ## Overview
//! The generator turns an effective policy into the ordered sequence of
//! candidate start times for one date. Sequences are finite, lazy, and
//! restartable: [`CandidateSlots`] is a cheap value and `iter()` yields a
//! fresh pass each time, so consumers may take a prefix without forcing full
//! generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;

use crate::core::BookingParams;
use crate::core::DurationRule;
use crate::core::EvaluationInstant;
use crate::core::RejectReason;
use crate::core::TimeOfDay;
use crate::core::time::day_offset;

// ============================================================================
// SECTION: Day Gate
// ============================================================================

/// Checks the date-level rules that gate any slot on the date.
///
/// # Errors
///
/// Returns the first failing [`RejectReason`]: weekday, blackout, then
/// horizon. Dates before today also fail the horizon check.
pub fn day_gate(params: &BookingParams, date: Date, today: Date) -> Result<(), RejectReason> {
    if !params.weekday_rules.weekday_allowed(date) {
        return Err(RejectReason::DisallowedWeekday);
    }
    if params.weekday_rules.is_blackout(date) {
        return Err(RejectReason::BlackoutDate);
    }
    let offset = day_offset(date, today);
    if offset < 0 || offset > i64::from(params.max_horizon_days) {
        return Err(RejectReason::BeyondHorizon);
    }
    Ok(())
}

/// Returns true when the start time satisfies the minimum lead time.
///
/// Lead time only applies when the date is today; future dates have no lower
/// bound.
#[must_use]
pub fn lead_time_ok(
    params: &BookingParams,
    date: Date,
    start: TimeOfDay,
    now: &EvaluationInstant,
) -> bool {
    if date != now.date {
        return true;
    }
    let floor = i32::from(now.time.minute_of_day()) + i32::from(params.min_lead_time_min);
    i32::from(start.minute_of_day()) >= floor
}

/// Returns true when the start time sits on the policy's granularity grid.
#[must_use]
pub fn start_on_grid(params: &BookingParams, start: TimeOfDay) -> bool {
    start.minute_of_day() % params.slot_granularity_min == 0
}

/// Returns true when any start window of the rule admits the start time.
///
/// The cutoff bounds the start only; it does not subtract the service
/// duration.
#[must_use]
pub fn window_admits(rule: &DurationRule, start: TimeOfDay) -> bool {
    rule.start_windows.iter().any(|window| start <= window.latest_start)
}

// ============================================================================
// SECTION: Candidate Generation
// ============================================================================

/// Produces the candidate start times for one date under a policy.
///
/// The result is empty when the date fails the day gate, when no duration
/// rule matches the service duration, or when the matched rule has no start
/// windows.
#[must_use]
pub fn generate_candidate_slots(
    params: &BookingParams,
    date: Date,
    service_duration_min: u16,
    now: &EvaluationInstant,
) -> CandidateSlots {
    let step_min = i32::from(params.slot_granularity_min);
    if day_gate(params, date, now.date).is_err() {
        return CandidateSlots::empty(step_min);
    }
    let Some(rule) = params.matching_rule(service_duration_min) else {
        return CandidateSlots::empty(step_min);
    };
    // Every window enumerates from midnight, so the union across windows
    // collapses to the furthest cutoff.
    let cutoff_min = rule
        .start_windows
        .iter()
        .map(|window| i32::from(window.latest_start.minute_of_day()))
        .max();
    let Some(cutoff_min) = cutoff_min else {
        return CandidateSlots::empty(step_min);
    };
    let floor_min = if date == now.date {
        i32::from(now.time.minute_of_day()) + i32::from(params.min_lead_time_min)
    } else {
        0
    };
    CandidateSlots {
        step_min,
        floor_min,
        cutoff_min: Some(cutoff_min),
    }
}

/// Finite, restartable sequence of candidate start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlots {
    /// Granularity step in minutes.
    step_min: i32,
    /// Inclusive minute-of-day lower bound from lead time.
    floor_min: i32,
    /// Inclusive minute-of-day cutoff; `None` yields no candidates.
    cutoff_min: Option<i32>,
}

impl CandidateSlots {
    /// Creates a sequence with no candidates.
    const fn empty(step_min: i32) -> Self {
        Self {
            step_min,
            floor_min: 0,
            cutoff_min: None,
        }
    }

    /// Starts a fresh pass over the sequence.
    #[must_use]
    pub fn iter(&self) -> SlotIter {
        let floor = self.floor_min.max(0);
        SlotIter {
            next_min: (floor + self.step_min - 1) / self.step_min * self.step_min,
            step_min: self.step_min,
            cutoff_min: self.cutoff_min.unwrap_or(-1),
        }
    }

    /// Returns true when the sequence yields no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl IntoIterator for &CandidateSlots {
    type Item = TimeOfDay;
    type IntoIter = SlotIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over candidate start times.
#[derive(Debug, Clone)]
pub struct SlotIter {
    /// Next minute-of-day position to yield.
    next_min: i32,
    /// Granularity step in minutes.
    step_min: i32,
    /// Inclusive cutoff; positions past it end the sequence.
    cutoff_min: i32,
}

impl Iterator for SlotIter {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<TimeOfDay> {
        if self.next_min > self.cutoff_min {
            return None;
        }
        let minute = u16::try_from(self.next_min).ok()?;
        let slot = TimeOfDay::from_minute_of_day(minute).ok()?;
        self.next_min += self.step_min;
        Some(slot)
    }
}
