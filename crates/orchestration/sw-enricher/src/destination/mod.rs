//! Record destinations.
//!
//! - [`StdoutDestination`]: Writes records as JSON Lines or pretty JSON

mod stdout;

pub use stdout::{OutputFormat, StdoutDestination};

use async_trait::async_trait;
use sw_error::Result;
use sw_types::Record;

/// Sink for enriched records, written in the order they are produced.
#[async_trait]
pub trait RecordDestination: Send {
    /// Write one record.
    async fn write(&mut self, record: &Record) -> Result<()>;

    /// Flush anything buffered.
    async fn flush(&mut self) -> Result<()>;
}
