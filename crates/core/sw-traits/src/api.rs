//! Enrichment API trait.

use async_trait::async_trait;
use std::sync::Arc;
use sw_types::{Identifier, LookupResult};

/// The capability set of the enrichment service.
///
/// Implementations return every outcome as a value: a decoded response on
/// success, or a [`sw_error::LookupFailure`] once retrying has stopped.
/// Callers never see transport errors directly.
///
/// Any implementation of the three lookups can stand in for the HTTP
/// client, which is how the orchestrator is tested without a network.
#[async_trait]
pub trait EnrichmentApi: Send + Sync {
    /// Looks up a file hash.
    async fn lookup_object(&self, hash: &str) -> LookupResult;

    /// Looks up a hostname.
    async fn lookup_hostname(&self, hostname: &str) -> LookupResult;

    /// Looks up an IP address.
    async fn lookup_ip(&self, ip: &str) -> LookupResult;

    /// Dispatches to the lookup matching the identifier's kind.
    async fn lookup(&self, identifier: &Identifier) -> LookupResult {
        match identifier {
            Identifier::ObjectHash(hash) => self.lookup_object(hash).await,
            Identifier::Hostname(hostname) => self.lookup_hostname(hostname).await,
            Identifier::Ip(ip) => self.lookup_ip(ip).await,
        }
    }
}

#[async_trait]
impl<T: EnrichmentApi + ?Sized> EnrichmentApi for Arc<T> {
    async fn lookup_object(&self, hash: &str) -> LookupResult {
        (**self).lookup_object(hash).await
    }

    async fn lookup_hostname(&self, hostname: &str) -> LookupResult {
        (**self).lookup_hostname(hostname).await
    }

    async fn lookup_ip(&self, ip: &str) -> LookupResult {
        (**self).lookup_ip(ip).await
    }
}

#[async_trait]
impl<T: EnrichmentApi + ?Sized> EnrichmentApi for Box<T> {
    async fn lookup_object(&self, hash: &str) -> LookupResult {
        (**self).lookup_object(hash).await
    }

    async fn lookup_hostname(&self, hostname: &str) -> LookupResult {
        (**self).lookup_hostname(hostname).await
    }

    async fn lookup_ip(&self, ip: &str) -> LookupResult {
        (**self).lookup_ip(ip).await
    }
}
