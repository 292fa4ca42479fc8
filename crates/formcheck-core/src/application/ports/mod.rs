//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `formcheck-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Document`: element queries and mutations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `FormValidator::dispatch` receives host events

pub mod output;

pub use output::Document;

#[cfg(test)]
pub use output::MockDocument;
