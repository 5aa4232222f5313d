//! Configuration for the DashScope (Qwen ASR) file transcription API.

use std::time::Duration;
use zeroize::Zeroizing;

// =============================================================================
// Constants
// =============================================================================

/// International DashScope endpoint for asynchronous file transcription.
pub const DASHSCOPE_ASR_URL: &str =
    "https://dashscope-intl.aliyuncs.com/api/v1/services/audio/asr/transcription";

/// Default model for file transcription.
pub const DEFAULT_MODEL: &str = "qwen3-asr-flash-filetrans";

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Main Configuration
// =============================================================================

/// DashScope ASR provider configuration.
#[derive(Clone)]
pub struct DashScopeConfig {
    /// API key sent as a bearer token.
    pub api_key: Zeroizing<String>,

    /// Transcription endpoint. Status queries go to `{base_url}/{task_id}`.
    pub base_url: String,

    pub model: String,

    /// Recognition language code.
    pub language: String,

    /// Inverse text normalization (numbers, dates).
    pub enable_itn: bool,

    /// Timeout applied to each submission and status query.
    pub request_timeout: Duration,
}

impl DashScopeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("DashScope API key is empty".to_string());
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid DashScope base URL '{}': {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "DashScope base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.model.trim().is_empty() {
            return Err("DashScope model must not be empty".to_string());
        }

        if self.request_timeout.is_zero() {
            return Err("DashScope request timeout must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Status endpoint for a task.
    pub fn task_url(&self, task_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), task_id)
    }
}

impl Default for DashScopeConfig {
    fn default() -> Self {
        Self {
            api_key: Zeroizing::new(String::new()),
            base_url: DASHSCOPE_ASR_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            enable_itn: true,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for DashScopeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashScopeConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("language", &self.language)
            .field("enable_itn", &self.enable_itn)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
