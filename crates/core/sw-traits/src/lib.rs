//! Core traits for the Stairwell enrichment adapter.
//!
//! - [`EnrichmentApi`] - The three upstream lookups, implemented by the
//!   HTTP client and by test doubles

pub mod api;

pub use api::*;
