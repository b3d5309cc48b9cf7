//! Environment variable loading for [`GatewayConfig`].
//!
//! All settings use the `PPEGUARD_` prefix except the provider API key,
//! which keeps the provider's conventional name (`GEMINI_API_KEY` /
//! `OPENAI_API_KEY`). The key is read once here; nothing consults the
//! environment after startup.

use std::collections::HashMap;

use crate::schema::{GatewayConfig, Provider};

/// Load configuration from the process environment with defaults.
pub fn from_env() -> GatewayConfig {
    from_env_map(&std::env::vars().collect())
}

/// Load configuration from a provided map (useful for testing).
pub fn from_env_map(env: &HashMap<String, String>) -> GatewayConfig {
    let defaults = GatewayConfig::default();

    let provider = env
        .get("PPEGUARD_PROVIDER")
        .and_then(|p| p.parse::<Provider>().ok())
        .unwrap_or(defaults.provider);

    GatewayConfig {
        bind_address: env
            .get("PPEGUARD_BIND")
            .cloned()
            .unwrap_or(defaults.bind_address),
        port: env
            .get("PPEGUARD_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        provider,
        api_key: env.get(provider.api_key_var()).cloned().filter(|k| !k.trim().is_empty()),
        model: env
            .get("PPEGUARD_MODEL")
            .cloned()
            .unwrap_or_else(|| provider.default_model().to_string()),
        max_upload_bytes: env
            .get("PPEGUARD_MAX_UPLOAD_BYTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_upload_bytes),
        log_level: env.get("RUST_LOG").cloned().unwrap_or(defaults.log_level),
    }
}
