//! Infrastructure adapters for formcheck.
//!
//! This crate implements the ports defined in `formcheck-core::application::ports`.
//! It contains the in-memory document, the selector engine, and the file
//! loaders used by the CLI.

pub mod document;
pub mod fixture_loader;
pub mod selector;
pub mod settings_loader;

// Re-export commonly used adapters
pub use document::MemoryDocument;
pub use fixture_loader::{FileFormat, Fixture, FixtureLoader};
pub use selector::SelectorList;
pub use settings_loader::SettingsLoader;
