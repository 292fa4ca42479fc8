// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// An invalid form input is NOT a domain error: it is an expected state
/// reported through [`crate::domain::Assessment`]. These errors describe
/// misconfiguration of the validator itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Required setting missing or empty: {key}")]
    MissingSetting { key: &'static str },

    #[error("Invalid name rule: {reason}")]
    InvalidNameRule { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingSetting { key } => vec![
                format!("Provide a non-empty value for '{}'", key),
                "Every selector and class name must be supplied by the caller".into(),
                "Try: formcheck config list".into(),
            ],
            Self::InvalidNameRule { reason } => vec![
                "Check the name rule bounds".into(),
                format!("Details: {}", reason),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSetting { .. } | Self::InvalidNameRule { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
