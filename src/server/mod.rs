//! HTTP surface of the relay.
//!
//! ## Endpoints
//!
//! - `POST /api/chat` - forward one chat turn, always answers `{ "message": ... }`
//! - `GET /health` - health check

use std::error::Error;
use std::net::SocketAddr;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{HealthResponse, RelayReply, RelayRequest};
use crate::relay::RelayService;

/// Build the relay router around `relay`.
pub fn relay_routes(relay: RelayService) -> Router {
    Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

/// POST /api/chat
async fn handle_chat(
    State(relay): State<RelayService>,
    Json(request): Json<RelayRequest>,
) -> Json<RelayReply> {
    Json(relay.relay(&request).await)
}

/// GET /health
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(addr: SocketAddr, relay: RelayService) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        backend = %relay.backend_url(),
        "relay listening"
    );

    axum::serve(listener, relay_routes(relay))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down relay");
        })
        .await?;
    Ok(())
}
