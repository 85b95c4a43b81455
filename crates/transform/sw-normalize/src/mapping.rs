//! Declarative field mapping tables.
//!
//! Each [`FieldMapping`] names one upstream key, the field it is written to,
//! and how the value is shaped on the way. Nested entries reuse the same
//! type, so a list of certificates is described by a table of its own.
//!
//! Lookup of an upstream key tries, in order, the key itself, any explicit
//! aliases, and finally its `snake_case` spelling. Absent and `null` values
//! produce no output field.

use crate::timestamp;
use serde_json::{Map, Value};
use sw_types::IdentifierKind;

/// How a matched upstream value is shaped into its output.
#[derive(Debug, Clone, Copy)]
pub enum Transform {
    /// Passed through unchanged.
    Copy,
    /// Rendered as a canonical UTC timestamp.
    Timestamp,
    /// A list whose object elements are projected through the given table.
    Records(&'static [FieldMapping]),
    /// A single object projected through the given table.
    Object(&'static [FieldMapping]),
}

/// One upstream → output field rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub upstream: &'static str,
    /// Alternate upstream spellings from older API revisions.
    pub aliases: &'static [&'static str],
    pub output: &'static str,
    pub transform: Transform,
}

impl FieldMapping {
    pub const fn copy(upstream: &'static str, output: &'static str) -> Self {
        Self::new(upstream, output, Transform::Copy)
    }

    pub const fn timestamp(upstream: &'static str, output: &'static str) -> Self {
        Self::new(upstream, output, Transform::Timestamp)
    }

    pub const fn records(
        upstream: &'static str,
        output: &'static str,
        fields: &'static [FieldMapping],
    ) -> Self {
        Self::new(upstream, output, Transform::Records(fields))
    }

    pub const fn object(
        upstream: &'static str,
        output: &'static str,
        fields: &'static [FieldMapping],
    ) -> Self {
        Self::new(upstream, output, Transform::Object(fields))
    }

    const fn new(upstream: &'static str, output: &'static str, transform: Transform) -> Self {
        Self {
            upstream,
            aliases: &[],
            output,
            transform,
        }
    }

    pub const fn with_aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    /// Find this field's upstream value, skipping `null`.
    pub fn find<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        let present = |key: &str| source.get(key).filter(|v| !v.is_null());

        present(self.upstream)
            .or_else(|| self.aliases.iter().find_map(|&alias| present(alias)))
            .or_else(|| present(&snake_case(self.upstream)))
    }

    /// The shaped output value, if the upstream field is present.
    pub fn project(&self, source: &Value) -> Option<Value> {
        self.find(source).map(|value| self.transform.apply(value))
    }
}

impl Transform {
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Transform::Copy => value.clone(),
            Transform::Timestamp => timestamp::normalize(value),
            Transform::Records(fields) => match value {
                Value::Array(items) => Value::Array(
                    items.iter().map(|item| project_object(fields, item)).collect(),
                ),
                other => other.clone(),
            },
            Transform::Object(fields) => project_object(fields, value),
        }
    }
}

/// Write every mapped field found in `source` into `out`.
pub fn apply(mappings: &[FieldMapping], source: &Value, out: &mut Map<String, Value>) {
    for mapping in mappings {
        if let Some(value) = mapping.project(source) {
            out.insert(mapping.output.to_string(), value);
        }
    }
}

fn project_object(fields: &[FieldMapping], value: &Value) -> Value {
    match value {
        Value::Object(_) => {
            let mut projected = Map::new();
            apply(fields, value, &mut projected);
            Value::Object(projected)
        }
        other => other.clone(),
    }
}

fn snake_case(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, c) in camel.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

const OPINION_FIELDS: &[FieldMapping] = &[
    FieldMapping::copy("verdict", "verdict"),
    FieldMapping::copy("environment", "environment"),
];

const COMMENT_FIELDS: &[FieldMapping] = &[
    FieldMapping::copy("body", "body"),
    FieldMapping::copy("environment", "environment"),
];

/// Fields projected for every identifier kind.
pub const COMMON_MAPPINGS: &[FieldMapping] = &[
    FieldMapping::records(
        "opinionsMostRecent",
        "stairwell_opinions_most_recent",
        OPINION_FIELDS,
    ),
    FieldMapping::records(
        "commentsMostRecent",
        "stairwell_comments_most_recent",
        COMMENT_FIELDS,
    ),
];

const CERTIFICATE_FIELDS: &[FieldMapping] = &[
    FieldMapping::copy("signature", "signature"),
    FieldMapping::copy("issuer", "issuer"),
    FieldMapping::copy("subject", "subject"),
    FieldMapping::timestamp("earliestValidTime", "earliestValidTime"),
    FieldMapping::timestamp("latestValidTime", "latestValidTime"),
];

const SIGNATURE_FIELDS: &[FieldMapping] = &[
    FieldMapping::records("x509Certificates", "x509Certificates", CERTIFICATE_FIELDS),
    FieldMapping::copy("pkcs7VerificationResult", "pkcs7VerificationResult"),
];

const PREVALENCE_FIELDS: &[FieldMapping] = &[
    FieldMapping::copy("assetCount", "assetCount"),
    FieldMapping::copy("prevalence", "prevalence"),
    FieldMapping::copy("environmentId", "environmentId"),
];

pub const OBJECT_MAPPINGS: &[FieldMapping] = &[
    FieldMapping::copy("fileSize", "stairwell_object_size"),
    FieldMapping::copy("fileEntropy", "stairwell_object_entropy"),
    FieldMapping::copy("fileHashSha256", "stairwell_object_sha256"),
    FieldMapping::copy("fileHashSha1", "stairwell_object_sha1"),
    FieldMapping::copy("fileHashMd5", "stairwell_object_md5"),
    FieldMapping::copy("fileHashImphash", "stairwell_object_imp_hash"),
    FieldMapping::copy("fileHashSortedImphash", "stairwell_object_sorted_imp_hash"),
    FieldMapping::copy("fileHashTlsh", "stairwell_object_tlsh"),
    FieldMapping::copy("fileMagic", "stairwell_object_magic"),
    FieldMapping::copy("fileMimeType", "stairwell_object_mime_type"),
    FieldMapping::object("signature", "stairwell_object_signature", SIGNATURE_FIELDS),
    FieldMapping::timestamp("sightingsFirst", "stairwell_object_first_seen_time"),
    FieldMapping::records(
        "sightingsPrevalence",
        "stairwell_object_prevalence",
        PREVALENCE_FIELDS,
    ),
    FieldMapping::copy("verdictIsWellKnown", "stairwell_object_is_well_known"),
    FieldMapping::copy(
        "verdictMalevalMaliciousProbability",
        "stairwell_object_mal_eval_probability",
    ),
    FieldMapping::copy("verdictMalevalLabels", "stairwell_object_mal_eval"),
    FieldMapping::copy("verdictYaraRuleMatches", "stairwell_object_yara_rule_matches"),
    FieldMapping::copy(
        "indicatorsIpsLikely",
        "stairwell_object_network_indicators_ip_addresses",
    ),
    FieldMapping::copy(
        "indicatorsHostnamesLikely",
        "stairwell_object_network_indicators_hostnames",
    ),
    FieldMapping::copy(
        "indicatorsHostnamesPrivate",
        "stairwell_object_network_indicators_hostnames_private",
    ),
    FieldMapping::copy("variants", "stairwell_object_variants"),
    FieldMapping::copy("summaryAi", "stairwell_ai_assessment"),
    FieldMapping::copy("summaryRtg", "stairwell_object_run_to_ground"),
    FieldMapping::copy("environments", "stairwell_object_environments"),
];

const DNS_RECORD_FIELDS: &[FieldMapping] = &[
    FieldMapping::copy("address", "address"),
    FieldMapping::timestamp("lookupTime", "lookupTime").with_aliases(&["time"]),
];

pub const HOSTNAME_MAPPINGS: &[FieldMapping] = &[
    FieldMapping::records(
        "lookupARecords",
        "stairwell_hostname_a_records",
        DNS_RECORD_FIELDS,
    ),
    FieldMapping::records(
        "lookupAaaaRecords",
        "stairwell_hostname_aaaa_records",
        DNS_RECORD_FIELDS,
    ),
    FieldMapping::records(
        "lookupMxRecords",
        "stairwell_hostname_mx_records",
        DNS_RECORD_FIELDS,
    ),
];

pub const IP_MAPPINGS: &[FieldMapping] = &[
    FieldMapping::copy("uninterestingAddr", "stairwell_uninteresting_addr"),
    FieldMapping::copy("hostnames", "stairwell_ip_hostnames"),
];

/// The kind-specific table applied after [`COMMON_MAPPINGS`].
pub fn kind_mappings(kind: IdentifierKind) -> &'static [FieldMapping] {
    match kind {
        IdentifierKind::Object => OBJECT_MAPPINGS,
        IdentifierKind::Hostname => HOSTNAME_MAPPINGS,
        IdentifierKind::Ip => IP_MAPPINGS,
    }
}
