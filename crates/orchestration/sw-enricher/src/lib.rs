//! Record orchestration for the Stairwell enrichment adapter.
//!
//! The [`Enricher`] takes records one at a time, looks up the configured
//! identifier field through an [`EnrichmentApi`](sw_traits::EnrichmentApi),
//! and merges the normalized result back into the record.
//!
//! Processing is strictly sequential: one record, one lookup, one output,
//! in input order. A record is never dropped; failed lookups surface as
//! `stairwell_error` fields on the record itself.
//!
//! # Example
//!
//! ```ignore
//! use sw_enricher::{Enricher, IdentifierFields, NdjsonSource, StdoutDestination};
//!
//! let fields = IdentifierFields::new().with_hostname("h");
//! let enricher = Enricher::from_fields(client, &fields)?;
//!
//! let mut source = NdjsonSource::new();
//! let mut destination = StdoutDestination::jsonl();
//! let stats = enricher.run(&mut source, &mut destination).await?;
//! ```

pub mod config;
pub mod destination;
mod enricher;
pub mod source;
pub mod stats;

#[cfg(test)]
mod test_util;

pub use config::{EnrichConfig, IdentifierFields, IdentifierSelector};
pub use destination::{OutputFormat, RecordDestination, StdoutDestination};
pub use enricher::{Enricher, RecordOutcome};
pub use source::{NdjsonSource, RecordSource};
pub use stats::{EnrichStats, StatsSnapshot};
