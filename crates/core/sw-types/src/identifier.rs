//! Identifier kinds and values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which upstream lookup an identifier selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// IP address lookup
    Ip,
    /// File hash / object lookup
    Object,
    /// Hostname lookup
    Hostname,
}

impl IdentifierKind {
    /// Value written to `stairwell_resource_type` and `stairwell_event_type`.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Ip => "ipaddress",
            Self::Object => "object",
            Self::Hostname => "hostname",
        }
    }

    /// Upstream endpoint segment under the enrichment API path.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Ip => "ip_event",
            Self::Object => "object_event",
            Self::Hostname => "hostname_event",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Object => write!(f, "object"),
            Self::Hostname => write!(f, "hostname"),
        }
    }
}

/// An identifier value tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Ip(String),
    ObjectHash(String),
    Hostname(String),
}

impl Identifier {
    /// Tags `value` with `kind`.
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        let value = value.into();
        match kind {
            IdentifierKind::Ip => Self::Ip(value),
            IdentifierKind::Object => Self::ObjectHash(value),
            IdentifierKind::Hostname => Self::Hostname(value),
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Ip(_) => IdentifierKind::Ip,
            Self::ObjectHash(_) => IdentifierKind::Object,
            Self::Hostname(_) => IdentifierKind::Hostname,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Ip(v) | Self::ObjectHash(v) | Self::Hostname(v) => v,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.value())
    }
}
