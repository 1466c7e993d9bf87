//! Single-route canned responses for client tests.
//!
//! A [`Stub`] answers exactly one method and path with a fixed status and
//! body, optionally after a delay, and records every request that hit it.
//! Anything else gets a bare 404 and is not recorded.

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};

pub use axum::http::{Method, StatusCode};

#[derive(Clone, Debug)]
pub struct StubRoute {
    pub method: Method,
    /// Full request path, e.g. `/v1/clusters`.
    pub path: String,
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubRoute {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            status: StatusCode::OK,
            body: String::new(),
            delay: None,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

struct StubState {
    route: StubRoute,
    called: AtomicBool,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running stub server. Stops serving when dropped.
pub struct Stub {
    addr: SocketAddr,
    state: Arc<StubState>,
    server: JoinHandle<()>,
}

impl Stub {
    pub async fn start(route: StubRoute) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(StubState {
            route,
            called: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(respond).with_state(state.clone());
        let server = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("stub server stopped: {err}");
            }
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Base URL without a path, e.g. `http://127.0.0.1:40000`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// `base_url` with `/v1` appended.
    pub fn endpoint(&self) -> String {
        format!("{}/v1", self.base_url())
    }

    pub fn called(&self) -> bool {
        self.state.called.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }
}

impl Drop for Stub {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// An endpoint on a local port that nothing listens on.
pub async fn unreachable_endpoint() -> Result<String, std::io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/v1"))
}

async fn respond(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let route = &state.route;
    if method != route.method || uri.path() != route.path {
        return StatusCode::NOT_FOUND.into_response();
    }

    state.called.store(true, Ordering::SeqCst);
    state.requests.lock().await.push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    });

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    (
        route.status,
        [(header::CONTENT_TYPE, "application/json")],
        route.body.clone(),
    )
        .into_response()
}
