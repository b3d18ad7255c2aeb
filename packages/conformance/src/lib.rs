//! Shared helpers for the warbler conformance test suite.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`RecordingTransport`] | In-memory [`Transport`] answering by path and recording every call |
//! | [`spawn_api`] | Ephemeral in-process HTTP server standing in for the API host |
//! | [`fixtures`] | Canned wire payloads |

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
use axum::Router;
use warbler::{ClientConfig, ConfigOverrides, Method, Params, Protocol, Transport, TransportError};

pub mod fixtures;

// --- recording transport ----------------------------------------------------
/// One call seen by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub params: Params,
}

/// Answers each path with a canned body and records every call.
///
/// Clones share the call log, so a test can hand one clone to a client and
/// inspect the other. Paths without a canned body answer HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    responses: Arc<HashMap<String, String>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingTransport {
    pub fn new<I, P, B>(responses: I) -> Self
    where
        I: IntoIterator<Item = (P, B)>,
        P: Into<String>,
        B: Into<String>,
    {
        Self {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(p, b)| (p.into(), b.into()))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The only call made. Panics unless exactly one call was recorded.
    pub fn single_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one transport call: {:?}", calls);
        calls.into_iter().next().unwrap_or_else(|| unreachable!())
    }

    pub fn assert_no_calls(&self) {
        let calls = self.calls();
        assert!(calls.is_empty(), "expected no transport calls, got {:?}", calls);
    }
}

impl Transport for RecordingTransport {
    fn invoke(&self, method: Method, path: &str, params: &Params) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                method,
                path: path.to_string(),
                params: params.clone(),
            });
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                status: 404,
                body: format!("no fixture for {}", path),
            })
    }
}

// --- fake api host ----------------------------------------------------------
/// A request as the fake API host received it.
#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
    pub headers: HeaderMap,
}

impl Received {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Handle to a running fake API host.
#[derive(Debug, Clone)]
pub struct FakeApi {
    pub port: u16,
    received: Arc<Mutex<Vec<Received>>>,
}

impl FakeApi {
    /// A client configuration pointing at this host over plain HTTP.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_overrides(&ConfigOverrides {
            host: Some("127.0.0.1".into()),
            port: Some(self.port),
            protocol: Some(Protocol::Http),
            ..Default::default()
        })
    }

    pub fn received(&self) -> Vec<Received> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Clone)]
struct ApiState {
    routes: Arc<HashMap<String, (u16, String)>>,
    received: Arc<Mutex<Vec<Received>>>,
}

/// Start an ephemeral in-process API host.
///
/// `routes` maps a request path to the status code and body it answers with;
/// any other path answers 404. The server runs on its own `tokio` runtime in
/// a background thread bound to an OS-assigned port on `127.0.0.1`, so the
/// blocking HTTP transport can be driven from plain `#[test]` functions.
///
/// # Panics
///
/// Panics if the runtime cannot start or the listener cannot be bound.
pub fn spawn_api<I>(routes: I) -> FakeApi
where
    I: IntoIterator<Item = (&'static str, u16, String)>,
{
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ApiState {
        routes: Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body)))
                .collect(),
        ),
        received: Arc::clone(&received),
    };
    let router = Router::new().fallback(respond).with_state(state);

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build fake api runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral port");
            let port = listener.local_addr().expect("get local addr").port();
            tx.send(port).expect("report fake api port");
            axum::serve(listener, router).await.expect("fake api error");
        });
    });

    let port = rx.recv().expect("fake api failed to start");
    FakeApi { port, received }
}

async fn respond(
    State(state): State<ApiState>,
    method: HttpMethod,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let path = uri.path().to_string();
    state
        .received
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(Received {
            method: method.to_string(),
            path: path.clone(),
            query: uri.query().map(str::to_string),
            body,
            headers,
        });

    match state.routes.get(&path) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"error":"Not found","request":"unknown path"}"#.to_string(),
        ),
    }
}
