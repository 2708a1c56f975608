// crates/booking-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Booking Gate Interfaces
// Description: Backend-agnostic interfaces for policy and appointment storage.
// Purpose: Define the contract surfaces used by the Booking Gate engine facade.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Booking Gate reads policies, appointment snapshots,
//! and day schedules without embedding backend-specific details.
//! Implementations must be deterministic and fail closed on missing or
//! invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::Date;

use crate::core::Appointment;
use crate::core::BookingPolicy;
use crate::core::DaySchedule;
use crate::core::ProfessionalId;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Errors surfaced by storage implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),
    /// The storage backend reported an error.
    #[error("store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Policy Source
// ============================================================================

/// Read-only source of booking policy records.
pub trait PolicySource {
    /// Returns the full pool of candidate policies.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when policies cannot be loaded.
    fn policies(&self) -> Result<Vec<BookingPolicy>, StoreError>;
}

// ============================================================================
// SECTION: Appointment Source
// ============================================================================

/// Read-only source of appointment snapshots for conflict detection.
pub trait AppointmentSource {
    /// Returns the professional's appointments on the given date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when appointments cannot be loaded.
    fn appointments_for(
        &self,
        professional_id: ProfessionalId,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError>;
}

// ============================================================================
// SECTION: Schedule Source
// ============================================================================

/// Read-only source of professional day schedules.
pub trait ScheduleSource {
    /// Returns the professional's working day for the given date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when no schedule exists or loading fails.
    fn day_schedule(
        &self,
        professional_id: ProfessionalId,
        date: Date,
    ) -> Result<DaySchedule, StoreError>;
}
