//! Retrying HTTP client for the Stairwell enrichment API.
//!
//! - [`Transport`] - GET with per-attempt timeout, bounded retries and
//!   `Retry-After` backoff, classifying every terminal outcome as a value
//! - [`EnrichmentClient`] - The three lookups over a [`Transport`],
//!   implementing [`sw_traits::EnrichmentApi`]
//! - [`ClientConfig`] - Base URL, timeout and retry settings
//!
//! # Example
//!
//! ```ignore
//! use sw_client::{ClientConfig, EnrichmentClient};
//! use sw_traits::EnrichmentApi;
//! use sw_types::Credentials;
//!
//! let creds = Credentials::from_json(&blob)?;
//! let client = EnrichmentClient::new(ClientConfig::new(), &creds, dispatch)?;
//!
//! match client.lookup_hostname("example.com").await {
//!     Ok(response) => println!("{response}"),
//!     Err(failure) => eprintln!("lookup failed: {failure}"),
//! }
//! ```

pub mod client;
pub mod config;
pub mod retry;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{EnrichmentClient, ENRICHMENT_API_PATH};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use retry::{parse_retry_after, RetryState, DEFAULT_MAX_RETRIES};
pub use transport::Transport;
