//! Unified error handling for formcheck core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

pub use crate::domain::ErrorCategory;

/// Root error type for formcheck core operations.
///
/// An invalid form input never produces a `FormError`; it is reported as a
/// validation outcome. These errors mean the validator or its document
/// could not do its job.
#[derive(Debug, Error, Clone)]
pub enum FormError {
    /// Errors from the domain layer (misconfiguration).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (document access failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FormError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in formcheck".into(),
                "Please report this issue at: https://github.com/cosecruz/formcheck/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Convenient result type alias.
pub type FormResult<T> = Result<T, FormError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> FormResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> FormResult<T> {
        self.map_err(|e| FormError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_configuration() {
        let err: FormError = DomainError::MissingSetting { key: "form_selector" }.into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("form_selector")));
    }

    #[test]
    fn lock_errors_are_internal() {
        let err: FormError = ApplicationError::DocumentLock.into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u32, std::num::ParseIntError> = "x".parse::<u32>();
        let err = parsed.context("parsing minlength").unwrap_err();
        assert!(err.to_string().contains("parsing minlength"));
    }
}
