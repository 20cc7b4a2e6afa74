//! Gemini LLM Gateway implementation

use super::error::{GeminiError, Result};
use super::wire::{GenerateContentRequest, GenerateContentResponse, error_message};
use async_trait::async_trait;
use persevan_application::{GatewayError, LlmGateway};
use persevan_domain::ModelRequest;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Fallback variable consulted when the configured one is unset.
const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Connection settings for [`GeminiGateway`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub api_key_env: String,
    pub connect_timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// LLM Gateway that calls the Gemini `generateContent` endpoint.
///
/// Every call is independent; the gateway keeps no conversation state.
/// Overall request deadlines are enforced by the session controller.
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiGateway {
    /// Create a gateway with an explicit API key.
    pub fn new(api_key: impl Into<String>, settings: &GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(GeminiError::Client)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a gateway, reading the key from the configured environment
    /// variable and then from `API_KEY`.
    pub fn from_env(settings: &GeminiSettings) -> Result<Self> {
        let api_key = [settings.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| GeminiError::MissingApiKey(settings.api_key_env.clone()))?;

        info!("Gemini gateway configured for {}", settings.base_url);
        Self::new(api_key, settings)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn send(&self, request: &ModelRequest) -> Result<String> {
        let body = GenerateContentRequest::from(request);
        let url = self.endpoint(request.model.as_str());

        debug!(
            "POST {} (mode: {}, images: {})",
            url,
            request.mode,
            request.image_count()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GeminiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Http {
                status,
                message: error_message(&body_text),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Decode(e.to_string()))?;

        let text = parsed.into_text();
        debug!("Gemini reply received ({} bytes)", text.len());
        Ok(text)
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, request: &ModelRequest) -> std::result::Result<String, GatewayError> {
        self.send(request).await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_format() {
        let settings = GeminiSettings {
            base_url: "http://localhost:9000/v1beta/".to_string(),
            ..GeminiSettings::default()
        };
        let gateway = GeminiGateway::new("k", &settings).unwrap();
        assert_eq!(
            gateway.endpoint("gemini-3-pro-preview"),
            "http://localhost:9000/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn test_from_env_missing_key() {
        let settings = GeminiSettings {
            api_key_env: "PERSEVAN_TEST_UNSET_KEY_VAR".to_string(),
            ..GeminiSettings::default()
        };
        // Only meaningful when the fallback is also absent.
        if std::env::var(FALLBACK_API_KEY_ENV).is_err() {
            assert!(matches!(
                GeminiGateway::from_env(&settings),
                Err(GeminiError::MissingApiKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_connection_error() {
        let settings = GeminiSettings {
            base_url: "http://127.0.0.1:9/v1beta".to_string(),
            connect_timeout: Duration::from_millis(500),
            ..GeminiSettings::default()
        };
        let gateway = GeminiGateway::new("k", &settings).unwrap();
        let request = persevan_domain::RequestBuilder::default().build(
            "hi",
            persevan_domain::ConsoleMode::Study,
            &[],
            &[],
        );

        let err = gateway.generate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::Timeout
        ));
    }
}
