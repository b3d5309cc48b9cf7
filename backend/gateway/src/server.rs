//! Main HTTP Gateway Server.
//!
//! Wires the analyze endpoint, health API, and browser client behind
//! permissive CORS and request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use ppeguard_config::GatewayConfig;
use ppeguard_vision::VisionBackend;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{analyze_api, health_api, webui};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub backend: Arc<dyn VisionBackend>,
}

impl GatewayState {
    pub fn new(config: Arc<GatewayConfig>, backend: Arc<dyn VisionBackend>) -> Self {
        Self { config, backend }
    }
}

/// Build the Axum router with all routes and middleware.
pub fn router(state: GatewayState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route(
            "/api/analyze-image",
            post(analyze_api::analyze_image).fallback(analyze_api::method_not_allowed),
        )
        .route("/api/health", get(health_api::get_health))
        .merge(webui::ui_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the Axum HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);
    info!("PPE gateway listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
