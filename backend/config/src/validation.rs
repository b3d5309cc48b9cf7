//! Config validation with user-friendly error messages.
//!
//! The server refuses to start when the report has errors; the `check`
//! command prints the full report.

use thiserror::Error;

use crate::schema::GatewayConfig;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("config error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &GatewayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !config.has_api_key() {
        report.error(
            "api_key",
            format!(
                "no API key configured; set {} before starting the server",
                config.provider.api_key_var()
            ),
        );
    }

    if config.model.trim().is_empty() {
        report.error("model", "model identifier cannot be empty");
    }

    if config.max_upload_bytes == 0 {
        report.error("max_upload_bytes", "upload limit cannot be zero");
    } else if config.max_upload_bytes > 50 * 1024 * 1024 {
        report.warn(
            "max_upload_bytes",
            "upload limit above 50 MiB; single-image uploads should not need this",
        );
    }

    if config.bind_address.trim().is_empty() {
        report.error("bind_address", "bind address cannot be empty");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Provider;

    #[test]
    fn missing_api_key_is_an_error() {
        let report = validate(&GatewayConfig::default());
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.path == "api_key"));
        assert!(report.errors[0].to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn error_names_the_selected_provider_variable() {
        let config = GatewayConfig { provider: Provider::OpenAi, ..Default::default() };
        let report = validate(&config);
        assert!(report.errors.iter().any(|e| e.message.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn complete_config_passes() {
        let config = GatewayConfig { api_key: Some("k-1234567890".to_string()), ..Default::default() };
        let report = validate(&config);
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn oversized_upload_limit_warns() {
        let config = GatewayConfig {
            api_key: Some("k-1234567890".to_string()),
            max_upload_bytes: 200 * 1024 * 1024,
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn zero_upload_limit_is_an_error() {
        let config = GatewayConfig {
            api_key: Some("k-1234567890".to_string()),
            max_upload_bytes: 0,
            ..Default::default()
        };
        assert!(!validate(&config).is_valid());
    }
}
