// crates/booking-gate-core/src/core/appointment.rs
// ============================================================================
// Module: Booking Gate Appointment Model
// Description: Appointment snapshots and professional day schedules.
// Purpose: Provide read-only conflict inputs for availability validation.
// Dependencies: crate::core::{identifiers, policy, time}, serde, time
// ============================================================================

//! ## Overview
//! Appointments are loaded by the surrounding application and consumed here as
//! a read-only snapshot for conflict detection. The engine never mutates
//! appointment records; transactional re-checks remain a storage concern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;

use crate::core::identifiers::ProfessionalId;
use crate::core::identifiers::ServiceId;
use crate::core::policy::BookingParams;
use crate::core::time::TimeOfDay;
use crate::core::time::TimeSpan;

// ============================================================================
// SECTION: Appointments
// ============================================================================

/// Existing appointment loaded from the appointment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Professional holding the appointment.
    pub professional_id: ProfessionalId,
    /// Service being performed, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    /// Calendar date of the appointment.
    pub date: Date,
    /// Wall-clock start time.
    pub start: TimeOfDay,
    /// Service duration in minutes.
    pub duration_min: u16,
    /// Lifecycle status.
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Returns the raw service interval `[start, start + duration)`.
    #[must_use]
    pub const fn interval(&self) -> TimeSpan {
        TimeSpan::from_start_duration(self.start, self.duration_min)
    }

    /// Returns the service interval widened by the policy buffers.
    #[must_use]
    pub fn buffered_interval(&self, params: &BookingParams) -> TimeSpan {
        let raw = self.interval();
        TimeSpan::new(
            raw.start_min - i32::from(params.buffer_before_min),
            raw.end_min + i32::from(params.buffer_after_min),
        )
    }
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked but not yet confirmed.
    Scheduled,
    /// Confirmed by the customer or staff.
    Confirmed,
    /// Service was performed.
    Completed,
    /// Cancelled before the start time.
    Cancelled,
    /// Customer did not attend.
    NoShow,
}

impl AppointmentStatus {
    /// Returns true when the appointment occupies the professional's time for
    /// conflict purposes. Only cancelled appointments release their slot.
    #[must_use]
    pub const fn counts_for_conflicts(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

// ============================================================================
// SECTION: Day Schedules
// ============================================================================

/// A professional's working day as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Wall-clock end of the professional's shift.
    pub shift_end: TimeOfDay,
    /// Break intervals within the shift.
    #[serde(default)]
    pub breaks: Vec<TimeSpan>,
}

impl DaySchedule {
    /// Creates a schedule with the given shift end and no breaks.
    #[must_use]
    pub const fn new(shift_end: TimeOfDay) -> Self {
        Self {
            shift_end,
            breaks: Vec::new(),
        }
    }

    /// Adds a break interval and returns the schedule.
    #[must_use]
    pub fn with_break(mut self, span: TimeSpan) -> Self {
        self.breaks.push(span);
        self
    }
}
