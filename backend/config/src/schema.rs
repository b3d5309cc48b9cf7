use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which external vision API the invoker talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    /// The environment variable the API key is read from.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Default model identifier for the provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::OpenAi => "gpt-4o",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            other => Err(format!("unknown provider '{other}' (expected 'gemini' or 'openai')")),
        }
    }
}

/// PPE gateway runtime configuration, constructed once at startup.
///
/// The vision invoker receives this struct explicitly; nothing reads the
/// process environment per request.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Upstream vision provider
    pub provider: Provider,
    /// API key for the provider; validated at startup
    pub api_key: Option<String>,
    /// Model identifier sent to the provider
    pub model: String,
    /// Maximum accepted multipart upload size in bytes
    pub max_upload_bytes: usize,
    /// Log level
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            provider: Provider::Gemini,
            api_key: None,
            model: Provider::Gemini.default_model().to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Whether a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Masked form of the API key, safe to print in `check` output and logs.
    pub fn redacted_key(&self) -> String {
        match self.api_key.as_deref() {
            None => "<unset>".to_string(),
            Some(k) if k.trim().is_empty() => "<unset>".to_string(),
            Some(k) if k.len() <= 8 => "****".to_string(),
            Some(k) => format!("{}…{}", &k[..4], &k[k.len() - 4..]),
        }
    }
}
