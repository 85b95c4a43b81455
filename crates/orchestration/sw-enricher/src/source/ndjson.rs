//! Newline-delimited JSON source implementation.

use super::RecordSource;
use async_trait::async_trait;
use serde_json::Value;
use std::io::{self, BufRead, BufReader};
use sw_error::{Result, SwError};
use sw_types::Record;
use tracing::{debug, trace, warn};

/// Source that reads JSON object records line by line.
///
/// Empty lines are skipped. Lines that are not a JSON object are logged
/// and skipped; [`NdjsonSource::invalid_lines`] counts them.
pub struct NdjsonSource {
    reader: Box<dyn BufRead + Send>,
    line_number: u64,
    invalid_lines: u64,
    eof_reached: bool,
}

impl NdjsonSource {
    /// Create a source reading stdin.
    pub fn new() -> Self {
        Self::with_reader(Box::new(BufReader::new(io::stdin())))
    }

    /// Create a source with a custom reader.
    pub fn with_reader(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader,
            line_number: 0,
            invalid_lines: 0,
            eof_reached: false,
        }
    }

    /// Number of non-empty lines that could not be read as a record.
    pub fn invalid_lines(&self) -> u64 {
        self.invalid_lines
    }
}

impl Default for NdjsonSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSource for NdjsonSource {
    async fn next_record(&mut self) -> Result<Option<Record>> {
        while !self.eof_reached {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| SwError::Source(format!("Failed to read input: {e}")))?;

            if read == 0 {
                self.eof_reached = true;
                debug!(lines = self.line_number, "Input EOF reached");
                break;
            }
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            trace!(line_number = self.line_number, "Read input line");

            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(record)) => return Ok(Some(record)),
                Ok(_) => {
                    self.invalid_lines += 1;
                    warn!(
                        line_number = self.line_number,
                        "Skipping input line that is not a JSON object"
                    );
                }
                Err(e) => {
                    self.invalid_lines += 1;
                    warn!(
                        line_number = self.line_number,
                        error = %e,
                        "Skipping unparseable input line"
                    );
                }
            }
        }

        Ok(None)
    }
}
