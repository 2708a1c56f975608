// crates/booking-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Booking Gate Identifiers
// Description: Canonical numeric identifiers for policies, services, and professionals.
// Purpose: Provide strongly typed, serializable IDs with stable integer forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical numeric identifiers used throughout
//! Booking Gate. Identifiers are opaque positive integers matching the policy
//! store schema and serialize transparently. Range validation happens at the
//! policy boundary rather than within these simple wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Booking policy identifier assigned by the policy store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(i64);

impl PolicyId {
    /// Creates a new policy identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for PolicyId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// Service identifier referencing the salon service catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(i64);

impl ServiceId {
    /// Creates a new service identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ServiceId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// Professional identifier referencing the staff roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfessionalId(i64);

impl ProfessionalId {
    /// Creates a new professional identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProfessionalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ProfessionalId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Store Timestamps
// ============================================================================

/// Unix-millisecond timestamp recorded by the policy store.
///
/// # Invariants
/// - Values are supplied by the surrounding store; the engine never reads
///   wall-clock time and only compares timestamps for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self::from_unix_millis(value)
    }
}
