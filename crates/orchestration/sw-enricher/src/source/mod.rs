//! Record sources.
//!
//! - [`NdjsonSource`]: Reads one JSON object per line (stdin by default)

mod ndjson;

pub use ndjson::NdjsonSource;

use async_trait::async_trait;
use sw_error::Result;
use sw_types::Record;

/// A finite, non-restartable sequence of input records.
#[async_trait]
pub trait RecordSource: Send {
    /// The next record, or `None` once the input is exhausted.
    async fn next_record(&mut self) -> Result<Option<Record>>;
}
