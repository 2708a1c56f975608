// crates/booking-gate-core/src/runtime/store.rs
// ============================================================================
// Module: Booking Gate In-Memory Store
// Description: Simple in-memory booking store for tests and examples.
// Purpose: Provide a deterministic source implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of the Booking Gate
//! source traits for tests and local demos. It is not intended for production
//! use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use time::Date;

use crate::core::Appointment;
use crate::core::BookingPolicy;
use crate::core::DaySchedule;
use crate::core::ProfessionalId;
use crate::interfaces::AppointmentSource;
use crate::interfaces::PolicySource;
use crate::interfaces::ScheduleSource;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory booking store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingStore {
    /// Policy pool returned to the resolver.
    policies: Vec<BookingPolicy>,
    /// Appointment snapshot across professionals and dates.
    appointments: Vec<Appointment>,
    /// Day schedules keyed by professional and date.
    schedules: BTreeMap<(ProfessionalId, Date), DaySchedule>,
}

impl InMemoryBookingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a policy record and returns the store.
    #[must_use]
    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policies.push(policy);
        self
    }

    /// Adds an appointment record and returns the store.
    #[must_use]
    pub fn with_appointment(mut self, appointment: Appointment) -> Self {
        self.appointments.push(appointment);
        self
    }

    /// Sets the day schedule for a professional and date, returning the store.
    #[must_use]
    pub fn with_schedule(
        mut self,
        professional_id: ProfessionalId,
        date: Date,
        schedule: DaySchedule,
    ) -> Self {
        self.schedules.insert((professional_id, date), schedule);
        self
    }
}

impl PolicySource for InMemoryBookingStore {
    fn policies(&self) -> Result<Vec<BookingPolicy>, StoreError> {
        Ok(self.policies.clone())
    }
}

impl AppointmentSource for InMemoryBookingStore {
    fn appointments_for(
        &self,
        professional_id: ProfessionalId,
        date: Date,
    ) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .filter(|appointment| {
                appointment.professional_id == professional_id && appointment.date == date
            })
            .cloned()
            .collect())
    }
}

impl ScheduleSource for InMemoryBookingStore {
    fn day_schedule(
        &self,
        professional_id: ProfessionalId,
        date: Date,
    ) -> Result<DaySchedule, StoreError> {
        self.schedules.get(&(professional_id, date)).cloned().ok_or_else(|| {
            StoreError::NotFound(format!(
                "day schedule for professional {professional_id} on {date}"
            ))
        })
    }
}
