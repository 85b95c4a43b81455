//! Common utilities for integration tests.
//!
//! [`FakeStairwell`] serves scripted responses keyed by the identifier at the
//! end of the request path. Identifiers without a script get `200 {}`.

use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, RETRY_AFTER};
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sw_client::{ClientConfig, EnrichmentClient};
use sw_enricher::{NdjsonSource, OutputFormat, StdoutDestination};
use sw_types::Credentials;
use tracing::Dispatch;

/// One scripted response.
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub retry_after: Option<&'static str>,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            retry_after: None,
        }
    }

    pub fn rate_limited(retry_after: &'static str) -> Self {
        Self {
            status: 429,
            body: String::new(),
            retry_after: Some(retry_after),
        }
    }
}

#[derive(Default)]
struct Script {
    responses: HashMap<String, Vec<Canned>>,
    served: HashMap<String, usize>,
    paths: Vec<String>,
}

/// In-process stand-in for the enrichment API.
#[derive(Clone, Default)]
pub struct FakeStairwell {
    script: Arc<Mutex<Script>>,
}

impl FakeStairwell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups of `id` with `responses` in order; the last one repeats.
    pub fn script(self, id: &str, responses: Vec<Canned>) -> Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .insert(id.to_string(), responses);
        self
    }

    /// Paths of every request received, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.script.lock().unwrap().paths.clone()
    }

    pub fn hits(&self) -> usize {
        self.script.lock().unwrap().paths.len()
    }

    /// Start serving on an ephemeral port, returning the base URL.
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(replay).with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/")
    }
}

async fn replay(State(server): State<FakeStairwell>, uri: Uri) -> Response {
    let canned = {
        let mut script = server.script.lock().unwrap();
        script.paths.push(uri.path().to_string());

        let id = uri.path().rsplit('/').next().unwrap_or_default().to_string();
        let served = script.served.entry(id.clone()).or_insert(0);
        let idx = *served;
        *served += 1;

        match script.responses.get(&id) {
            Some(responses) => responses[idx.min(responses.len() - 1)].clone(),
            None => Canned::json(200, serde_json::json!({})),
        }
    };

    let mut response = (StatusCode::from_u16(canned.status).unwrap(), canned.body).into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(retry_after) = canned.retry_after {
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from_static(retry_after));
    }
    response
}

/// A client pointed at `base_url` with a short timeout.
pub fn client(base_url: &str, max_retries: u32) -> EnrichmentClient {
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_request_timeout(Duration::from_secs(5))
        .with_max_retries(max_retries);
    let credentials = Credentials::new("test-token", "test-org", "test-user");
    EnrichmentClient::new(config, &credentials, Dispatch::none()).unwrap()
}

/// A source reading `lines` as NDJSON.
pub fn source(lines: &[Value]) -> NdjsonSource {
    let input: String = lines.iter().map(|line| format!("{line}\n")).collect();
    NdjsonSource::with_reader(Box::new(Cursor::new(input)))
}

/// Writer collecting output for inspection.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn destination(&self) -> StdoutDestination {
        StdoutDestination::with_writer(OutputFormat::Jsonl, Box::new(self.clone()))
    }

    /// Every output line, parsed.
    pub fn records(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
