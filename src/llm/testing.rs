//! Stub inference endpoint for transport tests
//!
//! Serves `POST /api/generate` on an ephemeral local port with a fixed reply
//! and records every request body it sees.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned reply served by the stub
#[derive(Debug, Clone)]
pub struct StubReply {
    status: StatusCode,
    body: String,
    content_type: &'static str,
    delay: Duration,
}

impl StubReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: "text/plain",
            delay: Duration::ZERO,
        }
    }

    /// Hold the reply back for `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    bodies: Arc<Mutex<Vec<Value>>>,
}

/// Handle to a running stub endpoint
pub struct StubEndpoint {
    pub base_url: String,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl StubEndpoint {
    pub fn recorded_bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn generate(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.bodies.lock().unwrap().push(body);
    tokio::time::sleep(state.reply.delay).await;
    (
        state.reply.status,
        [(header::CONTENT_TYPE, state.reply.content_type)],
        state.reply.body.clone(),
    )
        .into_response()
}

/// Start a stub endpoint in the background
pub async fn spawn_stub_endpoint(reply: StubReply) -> StubEndpoint {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        bodies: bodies.clone(),
    };
    let app = Router::new()
        .route("/api/generate", post(generate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubEndpoint {
        base_url: format!("http://{addr}"),
        bodies,
    }
}

/// A local URL with nothing listening on it
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
