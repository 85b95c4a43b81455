//! Error types and classification for the Stairwell enrichment adapter.
//!
//! This crate provides:
//! - [`SwError`] - Top-level error enum for run-fatal conditions
//! - [`LookupFailure`] - The closed set of per-record lookup failures
//! - [`ErrorCategory`] for reporting whether a failure was transient or permanent
//!
//! Per-record failures never abort a run. They travel as values from the
//! transport through the normalizer and end up as fields on the record.
//! Only [`SwError`] is allowed to stop processing.

use thiserror::Error;

/// Top-level error type for conditions that abort a run.
#[derive(Error, Debug)]
pub enum SwError {
    /// Identifier field selection or client settings are invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential blob could not be read or decoded
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Reading input records failed
    #[error("Source error: {0}")]
    Source(String),

    /// Writing output records failed
    #[error("Destination error: {0}")]
    Destination(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Terminal outcome of a lookup that did not produce a response body.
///
/// The transport retries transient conditions internally; a value of this
/// type means it has stopped retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// HTTP 404, carrying the first entry of the upstream `details` list
    #[error("NOT FOUND{}", fmt_detail(.detail))]
    NotFound { detail: Option<String> },

    /// Retry budget exhausted by rate limiting or network failures
    #[error("TOO MANY REQUESTS: retries exhausted after {attempts} attempts ({reason})")]
    RateLimited {
        attempts: u32,
        last_status: Option<u16>,
        reason: String,
    },

    /// HTTP 500 on every attempt
    #[error("INTERNAL ERROR: HTTP {status} after {attempts} attempts")]
    ServerError { status: u16, attempts: u32 },

    /// Any other non-success status, returned without retry
    #[error("ERROR: {}", fmt_client_error(.status, .code, .message))]
    ClientError {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    /// HTTP 200 whose body never decoded as JSON
    #[error("invalid response body after {attempts} attempts: {message}")]
    DecodeError { message: String, attempts: u32 },
}

fn fmt_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {d}"),
        None => String::new(),
    }
}

fn fmt_client_error(status: &u16, code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{code}, Reason: {message}"),
        (None, Some(message)) => format!("HTTP {status}, Reason: {message}"),
        (Some(code), None) => format!("{code} (HTTP {status})"),
        (None, None) => format!("HTTP {status}"),
    }
}

impl LookupFailure {
    /// HTTP status associated with the failure, if the upstream returned one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { last_status, .. } => *last_status,
            Self::ServerError { status, .. } => Some(*status),
            Self::ClientError { status, .. } => Some(*status),
            Self::DecodeError { .. } => None,
        }
    }
}

/// Error classification for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Retrying later may succeed
    ///
    /// Examples: rate limiting, HTTP 500, garbled bodies
    Transient,

    /// Retrying will not help
    ///
    /// Examples: unknown identifier, rejected credentials
    Permanent,
}

/// Classifies a lookup failure.
pub fn classify_failure(failure: &LookupFailure) -> ErrorCategory {
    match failure {
        LookupFailure::NotFound { .. } => ErrorCategory::Permanent,
        LookupFailure::ClientError { .. } => ErrorCategory::Permanent,
        LookupFailure::RateLimited { .. } => ErrorCategory::Transient,
        LookupFailure::ServerError { .. } => ErrorCategory::Transient,
        LookupFailure::DecodeError { .. } => ErrorCategory::Transient,
    }
}

/// Result type alias using SwError.
pub type Result<T> = std::result::Result<T, SwError>;
