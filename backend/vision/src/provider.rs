//! Vision provider invoker — one HTTP call per analysis, no retries.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use ppeguard_config::{GatewayConfig, Provider};
use ppeguard_core::AnalyzeError;
use serde_json::Value;
use tracing::info;

use crate::prompt::{inspection_prompt, response_schema};

/// Seam between the HTTP handlers and the external vision API.
///
/// Returns the model's raw text output; normalization happens in the caller.
/// Tests substitute a recording fake here.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    async fn analyze(&self, image: &[u8], mime_type: &str) -> Result<String, AnalyzeError>;
}

/// Real invoker talking to Gemini or OpenAI over reqwest.
pub struct HttpVisionClient {
    provider: Provider,
    api_key: Option<String>,
    model: String,
    http: reqwest::Client,
}

impl HttpVisionClient {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            provider: config.provider,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn require_key(&self) -> Result<&str, AnalyzeError> {
        match self.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => Ok(k),
            _ => Err(AnalyzeError::Config(format!(
                "no API key configured for provider '{}'",
                self.provider
            ))),
        }
    }

    async fn analyze_via_gemini(&self, b64: &str, mime_type: &str) -> Result<String, AnalyzeError> {
        let key = self.require_key()?;
        info!(model = %self.model, "analyzing image via Gemini");
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": inspection_prompt() },
                { "inlineData": { "mimeType": mime_type, "data": b64 } }
            ]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        let status = resp.status();
        let payload: Value = resp
            .json()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(upstream_error("gemini", &payload, status.as_u16()));
        }
        Ok(payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("{}")
            .to_string())
    }

    async fn analyze_via_openai(&self, b64: &str, mime_type: &str) -> Result<String, AnalyzeError> {
        let key = self.require_key()?;
        info!(model = %self.model, "analyzing image via OpenAI");
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": inspection_prompt() },
                    { "type": "image_url",
                      "image_url": { "url": format!("data:{};base64,{}", mime_type, b64) } }
                ]
            }],
            "response_format": { "type": "json_object" },
            "max_tokens": 1024
        });
        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        let status = resp.status();
        let payload: Value = resp
            .json()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(upstream_error("openai", &payload, status.as_u16()));
        }
        Ok(payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("{}")
            .to_string())
    }
}

/// Pull the upstream's own error message out of its error body when present.
fn upstream_error(provider: &str, payload: &Value, status: u16) -> AnalyzeError {
    let message = payload["error"]["message"]
        .as_str()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("upstream returned HTTP {status}"));
    AnalyzeError::Upstream { provider: provider.to_string(), message }
}

#[async_trait]
impl VisionBackend for HttpVisionClient {
    async fn analyze(&self, image: &[u8], mime_type: &str) -> Result<String, AnalyzeError> {
        // Key check comes first so a misconfigured server never opens a
        // connection to the provider.
        self.require_key()?;
        let b64 = STANDARD.encode(image);
        match self.provider {
            Provider::Gemini => self.analyze_via_gemini(&b64, mime_type).await,
            Provider::OpenAi => self.analyze_via_openai(&b64, mime_type).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppeguard_config::GatewayConfig;

    #[tokio::test]
    async fn missing_key_short_circuits_before_any_network_call() {
        let client = HttpVisionClient::from_config(&GatewayConfig::default());
        let err = client.analyze(b"img", "image/png").await.unwrap_err();
        match err {
            AnalyzeError::Config(msg) => assert!(msg.contains("gemini")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn upstream_error_prefers_the_upstream_message() {
        let payload = serde_json::json!({"error": {"message": "quota exceeded"}});
        let err = upstream_error("gemini", &payload, 429);
        assert!(err.to_string().contains("quota exceeded"));

        let err = upstream_error("gemini", &serde_json::json!({}), 503);
        assert!(err.to_string().contains("503"));
    }
}
