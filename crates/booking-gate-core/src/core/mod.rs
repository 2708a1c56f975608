// crates/booking-gate-core/src/core/mod.rs
// ============================================================================
// Module: Booking Gate Core Types
// Description: Canonical booking policy schema and evaluation record structures.
// Purpose: Provide stable, serializable types for policies, appointments, and decisions.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Booking Gate core types define the policy schema, appointment snapshots,
//! and decision records. These types are the canonical source of truth for
//! any derived API surfaces in the surrounding salon application.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod appointment;
pub mod decision;
pub mod hashing;
pub mod identifiers;
pub mod policy;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use appointment::Appointment;
pub use appointment::AppointmentStatus;
pub use appointment::DaySchedule;
pub use decision::BookingDecision;
pub use decision::BookingRequest;
pub use decision::DayAvailability;
pub use decision::DecisionOutcome;
pub use decision::FallbackMode;
pub use decision::RejectReason;
pub use decision::SlotVerdict;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::PolicyId;
pub use identifiers::ProfessionalId;
pub use identifiers::ServiceId;
pub use identifiers::Timestamp;
pub use policy::BookingParams;
pub use policy::BookingPolicy;
pub use policy::BreakHandling;
pub use policy::DurationRule;
pub use policy::FinishConstraints;
pub use policy::Overbooking;
pub use policy::PolicyError;
pub use policy::PolicyScope;
pub use policy::ScopeKind;
pub use policy::StartWindow;
pub use policy::WeekdayRules;
pub use time::DateRange;
pub use time::EvaluationInstant;
pub use time::MINUTES_PER_DAY;
pub use time::TimeOfDay;
pub use time::TimeParseError;
pub use time::TimeSpan;
