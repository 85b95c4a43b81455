//! Configuration types for enrichment runs.

use crate::destination::OutputFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use sw_client::ClientConfig;
use sw_error::{Result, SwError};
use sw_types::{Identifier, IdentifierKind, Record};

/// Record field names holding the identifier, one per lookup kind.
///
/// Exactly one of them must be set for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierFields {
    /// Field holding an IP address
    pub ip: Option<String>,

    /// Field holding a file hash
    pub object: Option<String>,

    /// Field holding a hostname
    pub hostname: Option<String>,
}

impl IdentifierFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ip(mut self, field: impl Into<String>) -> Self {
        self.ip = Some(field.into());
        self
    }

    pub fn with_object(mut self, field: impl Into<String>) -> Self {
        self.object = Some(field.into());
        self
    }

    pub fn with_hostname(mut self, field: impl Into<String>) -> Self {
        self.hostname = Some(field.into());
        self
    }

    /// Fields set in `overrides` replace the ones set here.
    pub fn merge(self, overrides: IdentifierFields) -> Self {
        Self {
            ip: overrides.ip.or(self.ip),
            object: overrides.object.or(self.object),
            hostname: overrides.hostname.or(self.hostname),
        }
    }

    /// Resolve the single configured field.
    ///
    /// Blank names count as unset. Zero or several configured fields is a
    /// [`SwError::Config`].
    pub fn resolve(&self) -> Result<IdentifierSelector> {
        let configured: Vec<(IdentifierKind, &str)> = [
            (IdentifierKind::Ip, &self.ip),
            (IdentifierKind::Object, &self.object),
            (IdentifierKind::Hostname, &self.hostname),
        ]
        .into_iter()
        .filter_map(|(kind, field)| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| (kind, name))
        })
        .collect();

        match configured.as_slice() {
            [(kind, field)] => Ok(IdentifierSelector::new(*kind, *field)),
            [] => Err(SwError::Config(
                "no identifier field configured; set one of the ip, object or hostname fields"
                    .to_string(),
            )),
            several => {
                let kinds: Vec<String> = several
                    .iter()
                    .map(|(kind, field)| format!("{kind}={field}"))
                    .collect();
                Err(SwError::Config(format!(
                    "exactly one identifier field may be configured, got {}",
                    kinds.join(", ")
                )))
            }
        }
    }
}

/// The resolved identifier field for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSelector {
    pub kind: IdentifierKind,
    pub field: String,
}

impl IdentifierSelector {
    pub fn new(kind: IdentifierKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
        }
    }

    /// The identifier carried by `record`, if any.
    ///
    /// Strings are used exactly as given and numbers are rendered as text.
    /// Only the empty string counts as no identifier; missing and non-scalar
    /// values also yield `None`.
    pub fn select(&self, record: &Record) -> Option<Identifier> {
        let value = match record.get(&self.field)? {
            Value::String(s) if s.is_empty() => return None,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        Some(Identifier::new(self.kind, value))
    }
}

/// Complete configuration for an enrichment run.
///
/// Loaded from YAML; every section is optional.
///
/// ```yaml
/// fields:
///   hostname: dest_host
/// client:
///   base_url: https://app.stairwell.com/
///   request_timeout: 20
///   max_retries: 10
/// output_format: jsonl
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub fields: IdentifierFields,
    pub client: ClientConfig,
    pub output_format: OutputFormat,
}

impl EnrichConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SwError::Config(format!("invalid config: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            SwError::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn with_fields(mut self, fields: IdentifierFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Check the whole configuration, returning the resolved selector.
    pub fn validate(&self) -> Result<IdentifierSelector> {
        let selector = self.fields.resolve()?;
        self.client.validate().map_err(SwError::Config)?;
        Ok(selector)
    }
}
