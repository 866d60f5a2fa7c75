use crate::config::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
};
use futures::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Open an SSE session.
///
/// The first event names the endpoint to POST client messages to; every
/// JSON-RPC response for the session follows as a `message` event.
pub async fn open_session(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (guard, mut responses) = state.sessions.open();
    let endpoint = format!("{}?sessionId={}", state.message_path, guard.id());

    let stream = async_stream::stream! {
        // Dropping the stream (client went away) closes the session
        let _guard = guard;

        yield Ok(Event::default().event("endpoint").data(endpoint));

        while let Some(response) = responses.recv().await {
            match Event::default().event("message").json_data(&response) {
                Ok(event) => yield Ok(event),
                Err(e) => tracing::error!("Failed to encode SSE message: {}", e),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
pub struct MessageParams {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// Accept one client message for a session
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MessageParams>,
    body: String,
) -> Response {
    let Some(sender) = params
        .session_id
        .as_deref()
        .and_then(|id| state.sessions.sender(id))
    else {
        return (StatusCode::NOT_FOUND, "Unknown session").into_response();
    };

    if let Err(e) = serde_json::from_str::<serde_json::Value>(&body) {
        tracing::debug!("Rejected malformed message: {}", e);
        return (StatusCode::BAD_REQUEST, format!("Invalid message: {}", e)).into_response();
    }

    let mcp = state.mcp.clone();
    tokio::spawn(async move {
        if let Some(response) = mcp.handle_message(&body).await {
            // Receiver is gone if the client disconnected meanwhile
            let _ = sender.send(response);
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
