//! Application layer for formcheck.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (FormValidator)
//! - **Ports**: Interface definitions (traits) for the host document
//! - **Events**: Host events routed to the validator
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! validation rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod events;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{FormReport, FormValidator, InputReport, enable_validation};

// Re-export port traits (for adapter implementation)
pub use ports::Document;

pub use events::{Event, EventKind, EventOutcome};

pub use error::ApplicationError;
