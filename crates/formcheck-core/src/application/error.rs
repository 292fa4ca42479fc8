//! Application layer errors.
//!
//! These errors represent failures talking to the document, not invalid
//! form input. Configuration errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{ErrorCategory, NodeId};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A handle does not belong to the document.
    #[error("Node {node} not found in document")]
    NodeNotFound { node: NodeId },

    /// A selector could not be parsed.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Input state was requested for a node that is not a form control.
    #[error("Node {node} is a <{tag}>, not a form control")]
    NotAnInput { node: NodeId, tag: String },

    /// An append would break the tree (cycle, self-append, root).
    #[error("Cannot append {child} to {parent}: {reason}")]
    InvalidHierarchy {
        parent: NodeId,
        child: NodeId,
        reason: String,
    },

    /// Document access failed (lock poisoned, etc.).
    #[error("Document lock error")]
    DocumentLock,

    /// A document fixture could not be read or parsed.
    #[error("Failed to load fixture {path}: {reason}")]
    FixtureLoad { path: PathBuf, reason: String },

    /// A settings file could not be read or parsed.
    #[error("Failed to load settings {path}: {reason}")]
    SettingsLoad { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NodeNotFound { node } => vec![
                format!("Node {} does not exist", node),
                "Handles are only valid for the document that issued them".into(),
            ],
            Self::InvalidSelector { selector, .. } => vec![
                format!("Check the selector: {}", selector),
                "Supported: tag, .class, #id, [attr], [attr=\"value\"], descendants, lists"
                    .into(),
            ],
            Self::NotAnInput { tag, .. } => vec![
                format!("<{}> elements are not validated", tag),
                "Narrow input_selector to <input> and <textarea> elements".into(),
            ],
            Self::InvalidHierarchy { reason, .. } => vec![
                format!("Tree mutation rejected: {}", reason),
                "An element cannot be appended to itself or its descendants".into(),
            ],
            Self::DocumentLock => vec![
                "The document is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::FixtureLoad { path, .. } => vec![
                format!("Failed to load: {}", path.display()),
                "Check that the file exists and is valid TOML or JSON".into(),
            ],
            Self::SettingsLoad { path, .. } => vec![
                format!("Failed to load: {}", path.display()),
                "A settings file must define all six keys".into(),
                "Run 'formcheck config list' to see the defaults".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NodeNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidSelector { .. } => ErrorCategory::Configuration,
            Self::NotAnInput { .. } => ErrorCategory::Configuration,
            Self::InvalidHierarchy { .. } => ErrorCategory::Internal,
            Self::DocumentLock => ErrorCategory::Internal,
            Self::FixtureLoad { .. } => ErrorCategory::Validation,
            Self::SettingsLoad { .. } => ErrorCategory::Configuration,
        }
    }
}
