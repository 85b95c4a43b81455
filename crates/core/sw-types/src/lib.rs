//! Core data types for the Stairwell enrichment adapter.
//!
//! This crate provides:
//! - [`Identifier`] / [`IdentifierKind`] - What a record is looked up by
//! - [`Record`], [`RawResponse`], [`OutputRecord`] - The JSON shapes moving through the pipeline
//! - [`Credentials`] - The decoded secret blob used to authenticate
//! - [`fields`] - Reserved output field names

pub mod credentials;
pub mod fields;
pub mod identifier;

pub use credentials::Credentials;
pub use identifier::{Identifier, IdentifierKind};

/// One unit of host-pipeline data: an ordered mapping of field name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Enrichment fields produced for a single lookup, all carrying the reserved prefix.
pub type OutputRecord = serde_json::Map<String, serde_json::Value>;

/// Decoded JSON body returned by the upstream service for one lookup.
pub type RawResponse = serde_json::Value;

/// Outcome of a single lookup as seen by the normalizer.
pub type LookupResult = std::result::Result<RawResponse, sw_error::LookupFailure>;
