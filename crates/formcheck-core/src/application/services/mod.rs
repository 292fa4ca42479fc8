//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate this input" or "wire this form".

pub mod form_validator;
pub mod report;

pub use form_validator::{FormValidator, enable_validation};
pub use report::{FormReport, InputReport};
