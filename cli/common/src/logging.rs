//! Logging initialization utilities.

use anyhow::Result;
use tracing::{Dispatch, Level};
use tracing_subscriber::fmt;

use crate::LogLevel;

/// Build a stderr subscriber at `level`.
pub fn log_dispatch(level: LogLevel) -> Dispatch {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    Dispatch::new(subscriber)
}

/// Install the global subscriber at `level`, returning it for injection.
///
/// Logs go to stderr; stdout carries only records.
pub fn init_logging(level: LogLevel) -> Result<Dispatch> {
    let dispatch = log_dispatch(level);

    tracing::dispatcher::set_global_default(dispatch.clone())
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(dispatch)
}
