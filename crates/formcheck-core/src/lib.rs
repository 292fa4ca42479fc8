//! Formcheck Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for formcheck,
//! a form validator that marks invalid inputs, renders error messages and
//! toggles submit buttons on a DOM-like document.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          formcheck-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (FormValidator)              │
//! │   Validation passes + event dispatch    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Driven: Document)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   formcheck-adapters (Infrastructure)   │
//! │   (MemoryDocument, fixture loader)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Settings, NameRule, Assessment)       │
//! │         No I/O, no document access      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formcheck_core::{
//!     application::{enable_validation, Event},
//!     domain::Settings,
//! };
//!
//! // 1. Describe how validity is rendered
//! let settings = Settings::new(
//!     ".popup__form",
//!     ".popup__input",
//!     ".popup__button",
//!     "popup__button_disabled",
//!     "popup__input_type_error",
//!     "popup__error_visible",
//! );
//!
//! // 2. Wire every form of an injected document
//! let mut validator = enable_validation(document, settings).unwrap();
//!
//! // 3. Route host events to the validator
//! let outcome = validator.dispatch(&Event::input(name_input)).unwrap();
//! ```

// Domain layer (pure validation rules)
pub mod domain;

// Application layer (orchestration over the document port)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        enable_validation, Event, EventKind, EventOutcome, FormReport, FormValidator, InputReport,
        ports::Document,
    };
    pub use crate::domain::{
        Assessment, InputState, NameRule, NameRuleViolation, NodeId, Settings, ValidityState,
    };
    pub use crate::error::{FormError, FormResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
