//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{ChatRequest, ChatResponse, ErrorResponse, ModelResponse};
use super::AppState;
use crate::runtime::{ConversationSnapshot, SseEvent};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the widget
        .route("/", get(serve_widget))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        .route("/api/conversation", get(get_conversation))
        .route("/api/chat", post(send_chat))
        .route("/api/stream", get(stream_conversation))
        .route("/api/model", get(get_model))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_widget() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - widget not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Conversation
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<ConversationSnapshot> {
    Json(state.conversation.snapshot())
}

async fn stream_conversation(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before taking the snapshot so no update falls in between
    let broadcast_rx = state.conversation.subscribe();
    let snapshot = state.conversation.snapshot();

    let init_event = SseEvent::Init {
        messages: snapshot.messages,
        busy: snapshot.busy,
    };

    sse_stream(init_event, broadcast_rx)
}

/// Queue the user's text. Blank text and submissions made while a reply
/// is pending are accepted here and dropped by the conversation.
async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    state
        .conversation
        .submit(req.text)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(ChatResponse { queued: true }))
}

// ============================================================
// Model info
// ============================================================

async fn get_model(State(state): State<AppState>) -> Json<ModelResponse> {
    Json(ModelResponse {
        model: state.model.clone(),
        endpoint: state.endpoint.clone(),
    })
}

async fn get_version() -> &'static str {
    concat!("calsense ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
