//! Retrying HTTP transport.
//!
//! One call to [`Transport::get`] drives an attempt loop:
//!
//! | response | action |
//! |---|---|
//! | network error / timeout | consume a retry, try again immediately |
//! | 200 with JSON body | return the body |
//! | 200 with garbled body | consume a retry, try again |
//! | 404 | return [`LookupFailure::NotFound`] |
//! | 429 with `Retry-After` | consume a retry, sleep, try again |
//! | 500 | consume a retry, try again |
//! | anything else | return [`LookupFailure::ClientError`] |
//!
//! When the budget runs out the most recent retry reason decides the
//! failure: 500 becomes `ServerError`, a garbled body `DecodeError`,
//! rate limiting or network errors `RateLimited`.

use crate::config::ClientConfig;
use crate::retry::{parse_retry_after, RetryState};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Response, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use sw_error::{LookupFailure, Result, SwError};
use sw_types::LookupResult;
use tokio::time::sleep;
use tracing::instrument::WithSubscriber;
use tracing::{debug, info, warn, Dispatch};

/// Why an attempt asked for another try.
#[derive(Debug)]
enum RetryReason {
    Network(String),
    Decode(String),
    ServerError(u16),
    RateLimited(Duration),
}

/// Result of a single attempt.
enum Attempt {
    Done(LookupResult),
    Retry(RetryReason),
}

/// HTTP transport issuing GET requests with bounded retries.
///
/// Diagnostics are emitted through the [`Dispatch`] given at construction;
/// the ambient dispatcher is never consulted.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    max_retries: u32,
    dispatch: Dispatch,
}

impl Transport {
    /// Create a transport sending `headers` with every request and logging
    /// to `dispatch`.
    pub fn new(config: &ClientConfig, headers: HeaderMap, dispatch: Dispatch) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| SwError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            max_retries: config.max_retries,
            dispatch,
        })
    }

    /// Fetch `url`, retrying transient failures.
    pub async fn get(&self, url: Url) -> LookupResult {
        self.get_with_state(url).await.0
    }

    /// Like [`get`](Self::get), also returning the spent retry state.
    pub async fn get_with_state(&self, url: Url) -> (LookupResult, RetryState) {
        self.attempt_loop(url)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn attempt_loop(&self, url: Url) -> (LookupResult, RetryState) {
        let mut state = RetryState::new(self.max_retries);

        loop {
            let attempt = state.begin_attempt();
            debug!(url = %url, attempt = attempt, "Sending request");

            let reason = match self.attempt(&url).await {
                Attempt::Done(result) => {
                    match &result {
                        Ok(_) => debug!(url = %url, attempt = attempt, "Request succeeded"),
                        Err(failure) => debug!(
                            url = %url,
                            attempt = attempt,
                            error = %failure,
                            "Request failed"
                        ),
                    }
                    return (result, state);
                }
                Attempt::Retry(reason) => reason,
            };

            if !state.consume() {
                let failure = exhausted(reason, state.attempts());
                warn!(
                    url = %url,
                    attempts = state.attempts(),
                    error = %failure,
                    "Retries exhausted"
                );
                return (Err(failure), state);
            }

            match reason {
                RetryReason::RateLimited(backoff) => {
                    info!(
                        url = %url,
                        attempt = attempt,
                        backoff_secs = backoff.as_secs(),
                        "Rate limited, backing off"
                    );
                    sleep(backoff).await;
                    state.record_sleep(backoff);
                }
                RetryReason::ServerError(status) => {
                    warn!(url = %url, attempt = attempt, status = status, "Server error, retrying");
                }
                RetryReason::Network(ref error) => {
                    warn!(url = %url, attempt = attempt, error = %error, "Request error, retrying");
                }
                RetryReason::Decode(ref error) => {
                    warn!(
                        url = %url,
                        attempt = attempt,
                        error = %error,
                        "Undecodable response, retrying"
                    );
                }
            }
        }
    }

    async fn attempt(&self, url: &Url) -> Attempt {
        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(RetryReason::Network(e.to_string())),
        };

        match response.status() {
            StatusCode::OK => match response.bytes().await {
                Ok(body) => match serde_json::from_slice::<Value>(&body) {
                    Ok(value) => Attempt::Done(Ok(value)),
                    Err(e) => Attempt::Retry(RetryReason::Decode(e.to_string())),
                },
                Err(e) => Attempt::Retry(RetryReason::Network(e.to_string())),
            },
            StatusCode::NOT_FOUND => {
                let body = error_body(response).await;
                Attempt::Done(Err(LookupFailure::NotFound {
                    detail: body.as_ref().and_then(first_detail),
                }))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                match response.headers().get(RETRY_AFTER).and_then(parse_retry_after) {
                    Some(backoff) => Attempt::Retry(RetryReason::RateLimited(backoff)),
                    None => Attempt::Done(Err(LookupFailure::ClientError {
                        status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
                        code: None,
                        message: Some(
                            "rate limited without a usable Retry-After header".to_string(),
                        ),
                    })),
                }
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                Attempt::Retry(RetryReason::ServerError(StatusCode::INTERNAL_SERVER_ERROR.as_u16()))
            }
            status => {
                let body = error_body(response).await;
                let (code, message) = body.as_ref().map(error_fields).unwrap_or_default();
                Attempt::Done(Err(LookupFailure::ClientError {
                    status: status.as_u16(),
                    code,
                    message,
                }))
            }
        }
    }
}

/// Failure reported once the retry budget is spent.
fn exhausted(reason: RetryReason, attempts: u32) -> LookupFailure {
    match reason {
        RetryReason::ServerError(status) => LookupFailure::ServerError { status, attempts },
        RetryReason::Decode(message) => LookupFailure::DecodeError { message, attempts },
        RetryReason::RateLimited(_) => LookupFailure::RateLimited {
            attempts,
            last_status: Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            reason: "rate limited".to_string(),
        },
        RetryReason::Network(error) => LookupFailure::RateLimited {
            attempts,
            last_status: None,
            reason: error,
        },
    }
}

/// Best-effort decode of an error body; upstream error bodies are optional.
async fn error_body(response: Response) -> Option<Value> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// First entry of the `details` list, rendered as text.
fn first_detail(body: &Value) -> Option<String> {
    body.get("details")?.as_array()?.first().map(value_text)
}

/// Upstream `code` and `message` fields.
fn error_fields(body: &Value) -> (Option<String>, Option<String>) {
    let field = |name: &str| body.get(name).filter(|v| !v.is_null()).map(value_text);
    (field("code"), field("message"))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
