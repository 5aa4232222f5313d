use std::time::Duration;
use zeroize::Zeroizing;

/// DeepSeek chat completions endpoint.
pub const DEEPSEEK_CHAT_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default per-request timeout in seconds. Completions can take a while.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct DeepSeekConfig {
    pub api_key: Zeroizing<String>,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl DeepSeekConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid DeepSeek base URL '{}': {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "DeepSeek base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.request_timeout.is_zero() {
            return Err("DeepSeek request timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: Zeroizing::new(String::new()),
            base_url: DEEPSEEK_CHAT_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for DeepSeekConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepSeekConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
