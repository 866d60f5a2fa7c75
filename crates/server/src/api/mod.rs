use crate::config::{AppState, ServerConfig};
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use t212_mcp::McpServer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod handlers;

/// Start the HTTP + SSE transport
pub async fn serve(config: ServerConfig, mcp: Arc<McpServer>) -> Result<()> {
    let state = Arc::new(AppState::new(&config, mcp));
    let app = create_router(&config, state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("MCP HTTP server listening on http://{}", addr);
    tracing::info!("SSE endpoint: {}", config.http.sse_path);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the transport router
fn create_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(not_found))
        .route(
            &config.http.sse_path,
            get(handlers::open_session).fallback(not_found),
        )
        .route(
            &config.http.message_path,
            post(handlers::post_message).fallback(not_found),
        )
        .fallback(not_found)
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": t212_mcp::server::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
