//! HTTP message endpoint for `serve` mode.
//!
//! ```text
//! POST /message   {"type":"SCAN_DUPLICATES"} | {"type":"DELETE_DUPLICATES"}
//! GET  /health
//! ```
//!
//! Commands run one at a time; a second request waits for the first.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pruner_core::{Request, Response};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::info;

use crate::dispatch::CommandRunner;

struct ServerState<R> {
    runner: R,
    busy: Mutex<()>,
}

/// Build the router around a command runner.
pub(crate) fn create_router<R: CommandRunner + 'static>(runner: R) -> Router {
    let state = Arc::new(ServerState {
        runner,
        busy: Mutex::new(()),
    });

    Router::new()
        .route("/message", post(message::<R>))
        .route("/health", get(health))
        .with_state(state)
}

async fn message<R: CommandRunner + 'static>(
    State(state): State<Arc<ServerState<R>>>,
    Json(request): Json<Request>,
) -> Json<Response> {
    let _guard = state.busy.lock().await;
    Json(state.runner.execute(request).await)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Bind and serve until the process is stopped.
pub(crate) async fn run_server<R: CommandRunner + 'static>(
    runner: R,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, create_router(runner)).await?;
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
