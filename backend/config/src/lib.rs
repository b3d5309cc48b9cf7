//! `ppeguard-config` — PPE gateway runtime configuration.
//!
//! Provides:
//! - Typed config schema with defaults
//! - Environment variable loading (with an injectable map for tests)
//! - Validation report with user-friendly error messages
//! - API key redaction for safe logging/display

pub mod env;
pub mod schema;
pub mod validation;

pub use env::{from_env, from_env_map};
pub use schema::{GatewayConfig, Provider};
pub use validation::{validate, ConfigValidationError, ValidationReport};
