use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::config::DeepSeekConfig;
use crate::core::chat::{ChatRelayError, RelayedResponse};

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("voxrelay-gateway/", env!("CARGO_PKG_VERSION"));

/// Forwards chat-completion requests to DeepSeek unchanged.
pub struct DeepSeekChat {
    config: DeepSeekConfig,
    http_client: Client,
}

impl DeepSeekChat {
    /// Fails with `ConfigMissing` when no API key is set.
    pub fn new(config: DeepSeekConfig) -> Result<Self, ChatRelayError> {
        if config.api_key.trim().is_empty() {
            return Err(ChatRelayError::ConfigMissing(
                "DeepSeek API key is not configured (DEEPSEEK_API_KEY)".to_string(),
            ));
        }
        config.validate().map_err(ChatRelayError::InvalidConfig)?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ChatRelayError::InvalidConfig(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &DeepSeekConfig {
        &self.config
    }

    /// Forward `body` and return the provider's status and JSON answer.
    ///
    /// Non-2xx answers are not errors here: they are returned as-is so the
    /// caller can pass them through.
    pub async fn relay(&self, body: &Value) -> Result<RelayedResponse, ChatRelayError> {
        let response = self
            .http_client
            .post(&self.config.base_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.as_str()),
            )
            .json(body)
            .send()
            .await
            .map_err(|e| ChatRelayError::Network(format!("Request failed: {e}")))?;

        let status = response.status();
        info!("DeepSeek answered with {}", status);

        let response_text = response
            .text()
            .await
            .map_err(|e| ChatRelayError::Network(format!("Failed to read response: {e}")))?;

        let body: Value = serde_json::from_str(&response_text).map_err(|e| {
            error!("DeepSeek returned a non-JSON body ({}): {}", status, e);
            ChatRelayError::InvalidResponse {
                status: status.as_u16(),
                details: response_text.clone(),
            }
        })?;

        if status.is_success() {
            debug!("DeepSeek completion relayed");
        } else {
            error!("DeepSeek error ({}): {}", status, body);
        }

        Ok(RelayedResponse {
            status: status.as_u16(),
            body,
        })
    }
}
