#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Router,
};

#[derive(Clone)]
enum MockBody {
    Text(String),
    Echo,
}

#[derive(Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: MockBody,
    delay: Duration,
    method: Option<Method>,
}

impl MockResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: MockBody::Text(body.into()),
            delay: Duration::ZERO,
            method: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self::json(status, "")
    }

    /// Replies 200 with the request body.
    pub fn echo() -> Self {
        Self {
            body: MockBody::Echo,
            ..Self::status(200)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replies 404 unless the request uses `method`.
    pub fn only_for(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    hits: Arc<AtomicUsize>,
}

async fn handler(
    State(state): State<MockState>,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .requests
        .lock()
        .expect("request log mutex must not be poisoned")
        .push(RecordedRequest {
            method: method.clone(),
            headers,
            body: body.clone(),
        });

    let response = {
        let mut queue = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        queue.pop_front().unwrap_or_else(|| {
            MockResponse::json(500, r#"{"error":"no mock response available"}"#)
        })
    };

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    if response.method.as_ref().is_some_and(|expected| *expected != method) {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "wrong method".to_owned(),
        );
    }

    let body = match response.body {
        MockBody::Text(text) => text,
        MockBody::Echo => body,
    };
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

pub struct TestServer {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log mutex must not be poisoned")
            .clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("server must have received a request")
    }
}

pub async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        requests: Arc::new(Mutex::new(Vec::new())),
        hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new().fallback(handler).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        requests: state.requests,
        task,
    }
}

/// Address of a port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind probe listener");
    let address = listener.local_addr().expect("must have local addr");
    drop(listener);
    format!("http://{address}/users")
}
