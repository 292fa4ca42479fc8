//! Command handlers, one module per subcommand.

pub mod check;
pub mod clear;
pub mod completions;
pub mod config;
pub mod init;

mod report;
mod session;
