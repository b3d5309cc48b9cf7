//! Gateway Health API
//!
//! Exposes a public endpoint reporting gateway liveness and the configured
//! provider, for the CLI `status` command and deployment checks.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        provider: state.config.provider.to_string(),
        model: state.config.model.clone(),
        timestamp: Utc::now(),
    })
}
