//! Enrichment API client.

use crate::config::ClientConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use sw_error::{Result, SwError};
use sw_traits::EnrichmentApi;
use sw_types::{Credentials, IdentifierKind, LookupResult};
use tracing::{debug, info, Dispatch};

/// Path of the enrichment API below the base URL.
pub const ENRICHMENT_API_PATH: &str = "labs/appapi/enrichment/v1/";

const ORGANIZATION_ID: &str = "organization-id";
const USER_ID: &str = "user-id";

/// Client for the three enrichment lookups.
///
/// Headers and endpoint URLs are fixed at construction. Retrying is left
/// entirely to the [`Transport`].
#[derive(Clone)]
pub struct EnrichmentClient {
    transport: Transport,
    api_root: Url,
    dispatch: Dispatch,
}

impl EnrichmentClient {
    /// Create a client authenticating with `credentials`.
    ///
    /// All client and transport diagnostics go to `dispatch`.
    pub fn new(
        config: ClientConfig,
        credentials: &Credentials,
        dispatch: Dispatch,
    ) -> Result<Self> {
        config.validate().map_err(SwError::Config)?;

        let api_root = config
            .parsed_base_url()
            .and_then(|base| {
                base.join(ENRICHMENT_API_PATH)
                    .map_err(|e| format!("failed to build API URL: {e}"))
            })
            .map_err(SwError::Config)?;

        let transport = Transport::new(&config, auth_headers(credentials)?, dispatch.clone())?;

        tracing::dispatcher::with_default(&dispatch, || {
            info!(
                api_root = %api_root,
                timeout_secs = config.request_timeout.as_secs(),
                max_retries = config.max_retries,
                "Enrichment client configured"
            );
        });

        Ok(Self {
            transport,
            api_root,
            dispatch,
        })
    }

    /// Full URL for looking up `id`; the identifier is percent-encoded as one path segment.
    pub fn lookup_url(&self, kind: IdentifierKind, id: &str) -> Url {
        let mut url = self.api_root.clone();
        // api_root is a validated http(s) URL, which always accepts segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind.endpoint()).push(id);
        }
        url
    }

    /// Fetch the enrichment for one identifier.
    pub async fn fetch(&self, kind: IdentifierKind, id: &str) -> LookupResult {
        let url = self.lookup_url(kind, id);
        tracing::dispatcher::with_default(&self.dispatch, || {
            debug!(kind = %kind, id = id, "Looking up identifier");
        });
        self.transport.get(url).await
    }
}

#[async_trait]
impl EnrichmentApi for EnrichmentClient {
    async fn lookup_object(&self, hash: &str) -> LookupResult {
        self.fetch(IdentifierKind::Object, hash).await
    }

    async fn lookup_hostname(&self, hostname: &str) -> LookupResult {
        self.fetch(IdentifierKind::Hostname, hostname).await
    }

    async fn lookup_ip(&self, ip: &str) -> LookupResult {
        self.fetch(IdentifierKind::Ip, ip).await
    }
}

/// Headers sent with every request.
fn auth_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let value = |name: &str, raw: &str| {
        HeaderValue::from_str(raw).map_err(|_| {
            SwError::Credentials(format!("{name} contains characters not allowed in a header"))
        })
    };

    let mut authorization = value("auth_token", &credentials.auth_token)?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(
        HeaderName::from_static(ORGANIZATION_ID),
        value("organization_id", &credentials.organization_id)?,
    );
    headers.insert(HeaderName::from_static(USER_ID), value("user_id", &credentials.user_id)?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}
