// crates/booking-gate-core/src/core/hashing.rs
// ============================================================================
// Module: Booking Gate Policy Fingerprints
// Description: RFC 8785 JSON canonicalization and digest helpers.
// Purpose: Provide stable policy fingerprints for decision records and re-checks.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Decisions carry a fingerprint of the policy that produced them so the
//! surrounding storage layer can detect policy drift between evaluation and
//! the transactional insert re-check. Fingerprints hash RFC 8785 (JCS)
//! canonical JSON, so field order and formatting never affect the digest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Hash Algorithm
// ============================================================================

/// Supported fingerprint algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 hashing.
    Sha256,
}

/// Default fingerprint algorithm.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

// ============================================================================
// SECTION: Hash Digest
// ============================================================================

/// Deterministic content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Fingerprint algorithm identifier.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex-encoded digest bytes.
    pub value: String,
}

impl HashDigest {
    /// Creates a digest from raw bytes.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, bytes: &[u8]) -> Self {
        let mut value = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(value, "{byte:02x}");
        }
        Self {
            algorithm,
            value,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing fingerprints.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Fingerprint Helpers
// ============================================================================

/// Hashes the canonical JSON form of a serializable value.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<HashDigest, HashError> {
    fingerprint_with(DEFAULT_HASH_ALGORITHM, value)
}

/// Hashes canonical JSON using a specific algorithm.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn fingerprint_with<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    let bytes =
        serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))?;
    Ok(match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            HashDigest::new(HashAlgorithm::Sha256, &hasher.finalize())
        }
    })
}
