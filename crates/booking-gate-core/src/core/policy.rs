// crates/booking-gate-core/src/core/policy.rs
// ============================================================================
// Module: Booking Gate Policy Model
// Description: Booking policy records, scoping, and nested scheduling rules.
// Purpose: Define canonical policy types with fail-closed validation helpers.
// Dependencies: crate::core::{hashing, identifiers, time}, serde, time
// ============================================================================

//! ## Overview
//! Booking policies attach a set of tunable scheduling rules to a scope in the
//! company → service → professional hierarchy. Records are validated at the
//! boundary before reaching the engine; the engine is entitled to surface a
//! [`PolicyError`] for malformed scope pairings instead of guessing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::Date;

use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::fingerprint;
use crate::core::identifiers::PolicyId;
use crate::core::identifiers::ProfessionalId;
use crate::core::identifiers::ServiceId;
use crate::core::identifiers::Timestamp;
use crate::core::time::DateRange;
use crate::core::time::TimeOfDay;
use crate::core::time::weekday_index;

// ============================================================================
// SECTION: Parameter Bounds
// ============================================================================

/// Smallest permitted slot granularity in minutes.
pub const MIN_SLOT_GRANULARITY_MIN: u16 = 5;
/// Largest permitted slot granularity in minutes.
pub const MAX_SLOT_GRANULARITY_MIN: u16 = 120;
/// Largest permitted minimum lead time in minutes (one week).
pub const MAX_LEAD_TIME_MIN: u16 = 10_080;
/// Smallest permitted booking horizon in days.
pub const MIN_HORIZON_DAYS: u16 = 1;
/// Largest permitted booking horizon in days.
pub const MAX_HORIZON_DAYS: u16 = 365;
/// Largest permitted buffer on either side of a service, in minutes.
pub const MAX_BUFFER_MIN: u16 = 240;
/// Largest permitted policy priority.
pub const MAX_PRIORITY: u16 = 999;

// ============================================================================
// SECTION: Booking Policy
// ============================================================================

/// A named set of scheduling constraints attached to a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// Store-assigned identifier; absent for unsaved drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PolicyId>,
    /// Human-readable policy name.
    #[serde(default)]
    pub name: String,
    /// Scope tier the policy applies to.
    pub scope_type: ScopeKind,
    /// Scoped entity identifier; must be absent for company scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<i64>,
    /// Selection priority within a specificity tier; higher wins.
    pub priority: u16,
    /// Inclusive first effective date; `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<Date>,
    /// Inclusive last effective date; `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<Date>,
    /// Inactive policies are never selected.
    pub active: bool,
    /// Tunable scheduling rules.
    pub params: BookingParams,
    /// Store-recorded last modification time, used for tie-breaking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl BookingPolicy {
    /// Returns the typed scope, enforcing the scope/scope_id pairing.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the pairing invariant is violated.
    pub fn scope(&self) -> Result<PolicyScope, PolicyError> {
        match (self.scope_type, self.scope_id) {
            (ScopeKind::Company, None) => Ok(PolicyScope::Company),
            (ScopeKind::Company, Some(_)) => Err(PolicyError::ScopeIdForbidden),
            (kind, None) => Err(PolicyError::ScopeIdMissing(kind)),
            (kind, Some(raw)) if raw <= 0 => Err(PolicyError::ScopeIdNotPositive {
                kind,
                value: raw,
            }),
            (ScopeKind::Service, Some(raw)) => Ok(PolicyScope::Service(ServiceId::new(raw))),
            (ScopeKind::Professional, Some(raw)) => {
                Ok(PolicyScope::Professional(ProfessionalId::new(raw)))
            }
        }
    }

    /// Returns true when the policy's effective window contains the date.
    #[must_use]
    pub fn in_effect_on(&self, date: Date) -> bool {
        DateRange::new(self.effective_from, self.effective_to).contains(date)
    }

    /// Computes the canonical fingerprint of the policy record.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when serialization fails.
    pub fn fingerprint(&self) -> Result<HashDigest, HashError> {
        fingerprint(self)
    }

    /// Validates the policy record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when validation fails.
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.scope()?;
        if self.priority > MAX_PRIORITY {
            return Err(PolicyError::PriorityOutOfRange(self.priority));
        }
        if let (Some(from), Some(to)) = (self.effective_from, self.effective_to)
            && from > to
        {
            return Err(PolicyError::EffectiveWindowInverted {
                from,
                to,
            });
        }
        self.params.validate()
    }
}

/// Scope tier of a booking policy, ordered by specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Applies to the whole company.
    Company,
    /// Applies to a single service.
    Service,
    /// Applies to a single professional.
    Professional,
}

impl ScopeKind {
    /// Returns the specificity rank; higher is narrower and wins selection.
    #[must_use]
    pub const fn specificity(self) -> u8 {
        match self {
            Self::Company => 0,
            Self::Service => 1,
            Self::Professional => 2,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Company => "company",
            Self::Service => "service",
            Self::Professional => "professional",
        };
        f.write_str(label)
    }
}

/// Typed scope derived from a validated policy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyScope {
    /// Company-wide scope.
    Company,
    /// Scope restricted to one service.
    Service(ServiceId),
    /// Scope restricted to one professional.
    Professional(ProfessionalId),
}

// ============================================================================
// SECTION: Booking Parameters
// ============================================================================

/// Tunable scheduling rules attached to a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingParams {
    /// Step size, in minutes, between candidate start times.
    pub slot_granularity_min: u16,
    /// Minimum minutes between "now" and a bookable start.
    pub min_lead_time_min: u16,
    /// Latest bookable day, in days relative to today.
    pub max_horizon_days: u16,
    /// Minutes reserved immediately before the service.
    pub buffer_before_min: u16,
    /// Minutes reserved immediately after the service.
    pub buffer_after_min: u16,
    /// Ordered duration rules; the first matching rule wins.
    pub duration_windows: Vec<DurationRule>,
    /// End-of-shift and break-handling policy.
    pub finish_constraints: FinishConstraints,
    /// Allowed weekdays and explicit blackout dates.
    pub weekday_rules: WeekdayRules,
    /// Parallel booking limits.
    pub overbooking: Overbooking,
}

impl BookingParams {
    /// Returns the first rule, in source order, whose duration range contains
    /// the service duration.
    #[must_use]
    pub fn matching_rule(&self, service_duration_min: u16) -> Option<&DurationRule> {
        self.duration_windows.iter().find(|rule| rule.matches(service_duration_min))
    }

    /// Validates parameter ranges and nested rules.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when a parameter is out of range.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.slot_granularity_min < MIN_SLOT_GRANULARITY_MIN
            || self.slot_granularity_min > MAX_SLOT_GRANULARITY_MIN
        {
            return Err(PolicyError::GranularityOutOfRange(self.slot_granularity_min));
        }
        if self.min_lead_time_min > MAX_LEAD_TIME_MIN {
            return Err(PolicyError::LeadTimeOutOfRange(self.min_lead_time_min));
        }
        if self.max_horizon_days < MIN_HORIZON_DAYS || self.max_horizon_days > MAX_HORIZON_DAYS {
            return Err(PolicyError::HorizonOutOfRange(self.max_horizon_days));
        }
        for buffer in [self.buffer_before_min, self.buffer_after_min] {
            if buffer > MAX_BUFFER_MIN {
                return Err(PolicyError::BufferOutOfRange(buffer));
            }
        }
        for (index, rule) in self.duration_windows.iter().enumerate() {
            if rule.max_duration < rule.min_duration {
                return Err(PolicyError::DurationRuleInverted {
                    index,
                    min: rule.min_duration,
                    max: rule.max_duration,
                });
            }
        }
        for dow in &self.weekday_rules.allowed_dow {
            if *dow > 6 {
                return Err(PolicyError::WeekdayOutOfRange(*dow));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Duration Rules
// ============================================================================

/// Maps a service duration range to the start windows that admit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationRule {
    /// Inclusive smallest duration matched by this rule, in minutes.
    pub min_duration: u16,
    /// Inclusive largest duration matched by this rule, in minutes.
    pub max_duration: u16,
    /// Start windows applied to matching services.
    pub start_windows: Vec<StartWindow>,
}

impl DurationRule {
    /// Returns true when the duration falls inside this rule's range.
    #[must_use]
    pub const fn matches(&self, service_duration_min: u16) -> bool {
        self.min_duration <= service_duration_min
            && service_duration_min <= self.max_duration
    }
}

/// A labeled wall-clock cutoff for candidate start times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartWindow {
    /// Display label for the window.
    pub label: String,
    /// Latest admissible start time, inclusive.
    pub latest_start: TimeOfDay,
}

// ============================================================================
// SECTION: Finish Constraints
// ============================================================================

/// End-of-shift and break-handling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishConstraints {
    /// When set, the service must end at or before the shift end.
    pub must_finish_before_shift_end: bool,
    /// How candidate intervals interact with the professional's breaks.
    pub respect_breaks: BreakHandling,
    /// Tolerated break overlap, in minutes, under the exception mode.
    #[serde(default)]
    pub break_exception_minutes: u16,
}

/// Break-handling mode for candidate intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakHandling {
    /// Any overlap with a break rejects the candidate.
    Respect,
    /// Overlap is allowed up to the configured exception budget per break.
    Exception,
    /// Breaks are ignored for conflict purposes.
    Merge,
}

// ============================================================================
// SECTION: Weekday Rules
// ============================================================================

/// Allowed weekdays and explicit blackout dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayRules {
    /// Bookable weekday indexes with Sunday as zero.
    pub allowed_dow: BTreeSet<u8>,
    /// Dates excluded from booking regardless of weekday.
    pub blackout_dates: BTreeSet<Date>,
}

impl WeekdayRules {
    /// Returns true when the date's weekday is in the allowed set.
    #[must_use]
    pub fn weekday_allowed(&self, date: Date) -> bool {
        self.allowed_dow.contains(&weekday_index(date))
    }

    /// Returns true when the date is an explicit blackout.
    #[must_use]
    pub fn is_blackout(&self, date: Date) -> bool {
        self.blackout_dates.contains(&date)
    }
}

// ============================================================================
// SECTION: Overbooking
// ============================================================================

/// Parallel booking limits for a professional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overbooking {
    /// Maximum concurrent non-cancelled appointments a professional may hold.
    pub max_parallel_per_professional: u16,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Booking policy validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Company-scoped policies must not carry a scope identifier.
    #[error("scope_id must be absent for company-scoped policies")]
    ScopeIdForbidden,
    /// Service- and professional-scoped policies require a scope identifier.
    #[error("scope_id is required for {0}-scoped policies")]
    ScopeIdMissing(ScopeKind),
    /// Scope identifiers must be positive integers.
    #[error("scope_id for {kind}-scoped policy must be positive, got {value}")]
    ScopeIdNotPositive {
        /// Scope tier carrying the invalid identifier.
        kind: ScopeKind,
        /// Offending identifier value.
        value: i64,
    },
    /// Priority exceeds the permitted maximum.
    #[error("priority {0} exceeds the maximum of {MAX_PRIORITY}")]
    PriorityOutOfRange(u16),
    /// Slot granularity falls outside the permitted range.
    #[error(
        "slot granularity {0} outside {MIN_SLOT_GRANULARITY_MIN}..={MAX_SLOT_GRANULARITY_MIN} minutes"
    )]
    GranularityOutOfRange(u16),
    /// Minimum lead time exceeds the permitted maximum.
    #[error("minimum lead time {0} exceeds {MAX_LEAD_TIME_MIN} minutes")]
    LeadTimeOutOfRange(u16),
    /// Booking horizon falls outside the permitted range.
    #[error("booking horizon {0} outside {MIN_HORIZON_DAYS}..={MAX_HORIZON_DAYS} days")]
    HorizonOutOfRange(u16),
    /// Buffer exceeds the permitted maximum.
    #[error("buffer {0} exceeds {MAX_BUFFER_MIN} minutes")]
    BufferOutOfRange(u16),
    /// Duration rule has an inverted range.
    #[error("duration rule {index} inverted: max {max} < min {min}")]
    DurationRuleInverted {
        /// Source-order index of the offending rule.
        index: usize,
        /// Rule minimum duration in minutes.
        min: u16,
        /// Rule maximum duration in minutes.
        max: u16,
    },
    /// Effective window has an inverted range.
    #[error("effective window inverted: {from} > {to}")]
    EffectiveWindowInverted {
        /// Window start date.
        from: Date,
        /// Window end date.
        to: Date,
    },
    /// Weekday index exceeds the Sunday-based range.
    #[error("weekday value {0} outside 0..=6")]
    WeekdayOutOfRange(u8),
}
