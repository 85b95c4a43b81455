//! Integration tests for the Stairwell enrichment adapter.
//!
//! Each test drives the real client, normalizer, and enricher against an
//! in-process HTTP server that stands in for the enrichment API, so no
//! network access or credentials are needed.

mod common;
mod enrich_test;
