// crates/booking-gate-config/src/records.rs
// ============================================================================
// Module: Booking Gate Policy Record Decoding
// Description: Fail-closed JSON decoding for booking policy records.
// Purpose: Reject malformed policy data before it reaches the engine.
// Dependencies: booking-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Policy records arrive as JSON from the policy store. Decoding validates
//! every record at the boundary so the engine only ever sees well-formed
//! policies; a single malformed record fails the whole load with its index.

// ============================================================================
// SECTION: Imports
// ============================================================================

use booking_gate_core::BookingPolicy;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Record Decoding
// ============================================================================

/// Decodes and validates a JSON array of policy records.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the JSON is malformed and
/// [`ConfigError::InvalidPolicy`] when a record violates a policy invariant.
pub fn decode_policies(json: &str) -> Result<Vec<BookingPolicy>, ConfigError> {
    let policies: Vec<BookingPolicy> =
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
    for (index, policy) in policies.iter().enumerate() {
        policy.validate().map_err(|source| ConfigError::InvalidPolicy {
            index,
            source,
        })?;
    }
    Ok(policies)
}

/// Decodes and validates a single JSON policy record.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the JSON is malformed and
/// [`ConfigError::InvalidPolicy`] when the record violates a policy
/// invariant.
pub fn decode_policy(json: &str) -> Result<BookingPolicy, ConfigError> {
    let policy: BookingPolicy =
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
    policy.validate().map_err(|source| ConfigError::InvalidPolicy {
        index: 0,
        source,
    })?;
    Ok(policy)
}
