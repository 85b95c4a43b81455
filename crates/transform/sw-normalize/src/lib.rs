//! Response normalization for Stairwell enrichment lookups.
//!
//! This crate turns upstream JSON into flat `stairwell_*` record fields:
//! - [`mapping`] - Declarative upstream → output tables, common and per kind
//! - [`timestamp`] - Canonical ISO-8601 rendering of upstream timestamps
//! - [`normalize_object`], [`normalize_hostname`], [`normalize_ip`] - The
//!   three projections, plus [`failure_record`] for failed lookups
//!
//! Everything here is pure: no I/O, no logging, and the same input always
//! yields the same output.

pub mod mapping;
mod normalize;
pub mod timestamp;

pub use mapping::{kind_mappings, FieldMapping, Transform, COMMON_MAPPINGS};
pub use normalize::{
    failure_record, normalize, normalize_hostname, normalize_ip, normalize_object, HOSTNAME,
};
