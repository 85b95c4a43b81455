//! In-process HTTP server replaying canned responses.

use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, RETRY_AFTER};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted response.
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub retry_after: Option<&'static str>,
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            retry_after: None,
            delay: None,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            retry_after: None,
            delay: None,
        }
    }

    pub fn rate_limited(retry_after: &'static str) -> Self {
        Self {
            status: 429,
            body: String::new(),
            retry_after: Some(retry_after),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Requests observed by the server.
#[derive(Clone, Default)]
pub struct Seen {
    pub paths: Arc<Mutex<Vec<String>>>,
    pub headers: Arc<Mutex<Vec<HeaderMap>>>,
    pub hits: Arc<AtomicUsize>,
}

impl Seen {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct Script {
    responses: Arc<Vec<Canned>>,
    seen: Seen,
}

async fn replay(State(script): State<Script>, uri: Uri, headers: HeaderMap) -> Response {
    let idx = script.seen.hits.fetch_add(1, Ordering::SeqCst);
    script.seen.paths.lock().unwrap().push(uri.path().to_string());
    script.seen.headers.lock().unwrap().push(headers);

    // The last response repeats once the script runs out
    let canned = script.responses[idx.min(script.responses.len() - 1)].clone();
    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

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

/// Serve `responses` in order on an ephemeral port.
pub async fn serve(responses: Vec<Canned>) -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new().fallback(replay).with_state(Script {
        responses: Arc::new(responses),
        seen: seen.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/"), seen)
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
