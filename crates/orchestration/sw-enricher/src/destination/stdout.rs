//! Stdout destination implementation.

use super::RecordDestination;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use sw_error::{Result, SwError};
use sw_types::Record;

/// Output format for stdout destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Pretty-printed JSON
    Json,
}

/// Destination that writes records as JSON/JSONL to stdout.
pub struct StdoutDestination {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
    records_written: u64,
    bytes_written: u64,
}

impl StdoutDestination {
    /// Create a new stdout destination.
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, Box::new(io::stdout()))
    }

    /// Create a destination writing to `writer` instead of stdout.
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            writer,
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Create a stdout destination with JSONL format.
    pub fn jsonl() -> Self {
        Self::new(OutputFormat::Jsonl)
    }

    /// Create a stdout destination with pretty JSON format.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Default for StdoutDestination {
    fn default() -> Self {
        Self::jsonl()
    }
}

#[async_trait]
impl RecordDestination for StdoutDestination {
    async fn write(&mut self, record: &Record) -> Result<()> {
        let line = match self.format {
            OutputFormat::Jsonl => serde_json::to_string(record),
            OutputFormat::Json => serde_json::to_string_pretty(record),
        }
        .map_err(|e| SwError::Destination(format!("Failed to serialize record: {e}")))?;

        writeln!(self.writer, "{line}")
            .map_err(|e| SwError::Destination(format!("Failed to write record: {e}")))?;

        self.records_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| SwError::Destination(format!("Failed to flush output: {e}")))
    }
}
