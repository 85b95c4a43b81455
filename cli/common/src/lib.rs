//! Shared utilities for the sw-enrich CLI.
//!
//! This crate provides logging setup, the `--log-level` argument type, and
//! number formatting for run summaries.

pub mod args;
pub mod format;
pub mod logging;

pub use args::LogLevel;
pub use format::format_number;
pub use logging::{init_logging, log_dispatch};
