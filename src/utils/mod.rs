//! Shared utilities
//!
//! Logging and progress reporting used across the library and the CLI.

pub mod logger;
pub mod progress;
