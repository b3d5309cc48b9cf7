//! Browser client static hosting.
//!
//! The client is a single self-contained HTML page embedded at build time,
//! so the server binary needs no asset directory at runtime.

use axum::response::Html;
use axum::{Router, routing::get};

use crate::server::GatewayState;

static INDEX_HTML: &str = include_str!("../assets/index.html");

/// Router serving the single-page client at the site root.
pub fn ui_router() -> Router<GatewayState> {
    Router::new().route("/", get(|| async { Html(INDEX_HTML) }))
}
