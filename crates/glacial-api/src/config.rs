//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use glacial_narrative::infrastructure::gemini::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiConfig,
};

use crate::error::AppError;

/// Settings for one server process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Model service settings.
    pub gemini: GeminiConfig,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let timeout_secs = match var("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("GEMINI_TIMEOUT_SECS must be a whole number: {e}"))
            })?,
            None => 30,
        };

        let gemini = GeminiConfig {
            api_key: var("GEMINI_API_KEY")
                .or_else(|| var("API_KEY"))
                .unwrap_or_default(),
            base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            text_model: var("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_owned()),
            image_model: var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_owned()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            host,
            port,
            gemini,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.gemini.api_key.is_empty());
        assert_eq!(config.gemini.text_model, "gemini-3-flash-preview");
        assert_eq!(config.gemini.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.gemini.timeout, Duration::from_secs(30));
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_gemini_key_wins_over_fallback_key() {
        let config = config_from(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]).unwrap();

        assert_eq!(config.gemini.api_key, "primary");
    }

    #[test]
    fn test_fallback_key_is_used_alone() {
        let config = config_from(&[("API_KEY", "fallback")]).unwrap();

        assert_eq!(config.gemini.api_key, "fallback");
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("PORT", "  "), ("OTEL_EXPORTER_OTLP_ENDPOINT", "")]).unwrap();

        assert_eq!(config.port, 3000);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = config_from(&[("PORT", "70000")]);

        match result {
            Err(AppError::Config(msg)) => assert!(msg.starts_with("PORT must be a valid u16")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(matches!(
            config_from(&[("GEMINI_TIMEOUT_SECS", "soon")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1beta"),
            ("GEMINI_TIMEOUT_SECS", "5"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.gemini.base_url, "http://localhost:9999/v1beta");
        assert_eq!(config.gemini.timeout, Duration::from_secs(5));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_unparseable_host_is_rejected_at_bind() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();

        assert!(matches!(config.bind_addr(), Err(AppError::Config(_))));
    }
}
