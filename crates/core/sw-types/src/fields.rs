//! Reserved output field names.
//!
//! Every key written into a record by the enrichment adapter starts with
//! [`PREFIX`], which keeps enrichment output apart from host-provided fields.

/// Prefix shared by every enrichment field.
pub const PREFIX: &str = "stairwell_";

pub const RESOURCE_TYPE: &str = "stairwell_resource_type";
pub const EVENT_TYPE: &str = "stairwell_event_type";
pub const RESOURCE_ID: &str = "stairwell_resource_id";

/// Human-readable failure message.
pub const ERROR: &str = "stairwell_error";
/// HTTP status of a failed lookup, as a string.
pub const STATUS: &str = "stairwell_status";

/// Returns true if `key` belongs to the enrichment namespace.
pub fn is_enrichment_field(key: &str) -> bool {
    key.starts_with(PREFIX)
}
