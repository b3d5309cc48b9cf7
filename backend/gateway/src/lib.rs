//! PPE Gateway HTTP API Server
//!
//! Provides the analyze endpoint, health API, and static hosting for the
//! browser client. Each request is handled independently; no state survives
//! between requests beyond the shared config and HTTP client.

pub mod analyze_api;
pub mod error;
pub mod health_api;
pub mod server;
pub mod upload;
pub mod webui;

pub use error::ApiError;
pub use server::{GatewayState, router, start_server};
