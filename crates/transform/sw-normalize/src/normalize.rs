use crate::mapping::{self, kind_mappings, COMMON_MAPPINGS};
use serde_json::Value;
use sw_error::LookupFailure;
use sw_types::{fields, IdentifierKind, LookupResult, OutputRecord, RawResponse};

/// Hostname echoed back on every successful hostname lookup.
pub const HOSTNAME: &str = "stairwell_hostname";

/// Project a lookup result for `id` onto output fields.
///
/// Success yields the metadata fields plus every mapped field present in the
/// response. Failure yields [`failure_record`] and nothing else.
pub fn normalize(kind: IdentifierKind, result: &LookupResult, id: &str) -> OutputRecord {
    match result {
        Ok(response) => project(kind, response, id),
        Err(failure) => failure_record(failure),
    }
}

pub fn normalize_object(result: &LookupResult, id: &str) -> OutputRecord {
    normalize(IdentifierKind::Object, result, id)
}

pub fn normalize_hostname(result: &LookupResult, id: &str) -> OutputRecord {
    normalize(IdentifierKind::Hostname, result, id)
}

pub fn normalize_ip(result: &LookupResult, id: &str) -> OutputRecord {
    normalize(IdentifierKind::Ip, result, id)
}

/// Error fields for a failed lookup.
///
/// `stairwell_status` is only present when the failure carries an HTTP status.
pub fn failure_record(failure: &LookupFailure) -> OutputRecord {
    let mut out = OutputRecord::new();
    out.insert(fields::ERROR.to_string(), Value::String(failure.to_string()));
    if let Some(status) = failure.status() {
        out.insert(fields::STATUS.to_string(), Value::String(status.to_string()));
    }
    out
}

fn project(kind: IdentifierKind, response: &RawResponse, id: &str) -> OutputRecord {
    let mut out = OutputRecord::new();
    out.insert(fields::EVENT_TYPE.to_string(), kind.event_type().into());
    out.insert(fields::RESOURCE_TYPE.to_string(), kind.event_type().into());
    out.insert(fields::RESOURCE_ID.to_string(), id.into());
    if kind == IdentifierKind::Hostname {
        out.insert(HOSTNAME.to_string(), id.into());
    }

    mapping::apply(COMMON_MAPPINGS, response, &mut out);
    mapping::apply(kind_mappings(kind), response, &mut out);
    out
}
