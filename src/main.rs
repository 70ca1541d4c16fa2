//! Calsense - calendar assistant chat widget
//!
//! Serves a browser chat widget and relays each message to a local
//! Ollama-compatible inference endpoint.

mod api;
mod conversation;
mod llm;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use llm::{InferenceClient, LlmConfig, LoggingService, OllamaService};
use runtime::ConversationHandle;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calsense=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = env_or("CALSENSE_PORT", DEFAULT_PORT);
    let bind: IpAddr = env_or("CALSENSE_BIND", IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let llm_config = LlmConfig::from_env();
    tracing::info!(
        endpoint = %llm_config.base_url,
        model = %llm_config.model,
        timeout_secs = llm_config.timeout.as_secs(),
        "Inference endpoint configured"
    );

    let model = llm_config.model.clone();
    let service = OllamaService::new(llm_config)?;
    let endpoint = service.base_url().to_string();
    let client = InferenceClient::new(Arc::new(LoggingService::new(Arc::new(service))));

    // Create application state
    let conversation = ConversationHandle::spawn(client);
    let state = AppState::new(conversation, model, endpoint);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::new(bind, port);
    tracing::info!("Calsense server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse an environment variable, falling back to `default` when unset or invalid
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
