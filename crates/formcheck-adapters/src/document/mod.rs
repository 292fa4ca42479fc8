//! Document adapters.

mod constraints;
mod memory;

pub use memory::MemoryDocument;
