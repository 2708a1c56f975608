// crates/booking-gate-config/src/config.rs
// ============================================================================
// Module: Booking Gate Configuration
// Description: Engine settings loading and validation for Booking Gate.
// Purpose: Provide strict, fail-closed config parsing for embedding hosts.
// Dependencies: booking-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Engine settings are loaded from a TOML file with strict size limits.
//! Missing or invalid configuration fails closed: the default fallback mode
//! blocks bookings when no policy matches, and hosts must opt in to the
//! unrestricted mode explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use booking_gate_core::EngineConfig;
use booking_gate_core::FallbackMode;
use booking_gate_core::PolicyError;
use booking_gate_core::TimeOfDay;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "booking-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "BOOKING_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

// ============================================================================
// SECTION: Engine Settings
// ============================================================================

/// Booking Gate engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct EngineSettings {
    /// Behavior when no effective policy matches a request.
    #[serde(default)]
    pub fallback_mode: FallbackMode,
    /// Shift end assumed by hosts that lack per-day schedules.
    #[serde(default)]
    pub default_shift_end: Option<TimeOfDay>,
}

impl EngineSettings {
    /// Loads settings from the given path, the environment override, or the
    /// default filename, in that order of preference.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_config_path(path);
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a setting is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_shift_end == Some(TimeOfDay::MIDNIGHT) {
            return Err(ConfigError::Invalid(
                "default shift end must be after midnight".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the engine configuration derived from these settings.
    #[must_use]
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fallback: self.fallback_mode,
        }
    }
}

/// Resolves the config path from the argument, environment, or default name.
fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(
        || {
            env::var(CONFIG_ENV_VAR)
                .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from)
        },
        Path::to_path_buf,
    )
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("config io error: {0}")]
    Io(String),
    /// Parsing the configuration content failed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A setting value is invalid.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// A policy record failed boundary validation.
    #[error("policy record {index} invalid: {source}")]
    InvalidPolicy {
        /// Zero-based index of the offending record.
        index: usize,
        /// Underlying validation error.
        #[source]
        source: PolicyError,
    },
}
