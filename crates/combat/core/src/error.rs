//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g. `StrikeError`, `HealthError`) are defined next
//! to the operations that produce them. This module provides the shared
//! severity classification every one of them reports through [`GameError`].
//!
//! # Classification
//!
//! - **Validation**: degenerate input rejected at a construction boundary
//!   (negative range, inverted hp bounds, ...).
//! - **Internal**: contract violations that indicate a caller bug (striking
//!   with a spent one-shot attacker, overriding hp above its maximum, ...).

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative range, width below zero, hp above its maximum at spawn
    Validation,

    /// Internal error - a caller broke an operation's contract.
    ///
    /// Examples: second attack from a spent one-shot attacker, striking an
    /// entity that cannot take damage. These indicate bugs and should be
    /// investigated.
    Internal,

    /// Fatal error - simulation state corrupted, cannot continue.
    ///
    /// Examples: entity id space exhausted
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
