//! Configuration module for the VoxRelay gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use voxrelay_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::core::chat::deepseek::{DEEPSEEK_CHAT_URL, DeepSeekConfig};
use crate::core::poller::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, DEFAULT_SENTINEL_TEXT, MissingResultPolicy,
    PollerConfig, TransportErrorPolicy,
};
use crate::core::stt::dashscope::{
    DASHSCOPE_ASR_URL, DEFAULT_LANGUAGE, DEFAULT_MODEL, DashScopeConfig,
};

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default outbound request timeout for provider calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

/// Default maximum accepted request body. Base64 audio is large.
pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration
///
/// Contains everything needed to run the gateway:
/// - Server settings (host, port, body limit)
/// - Security settings (CORS)
/// - DashScope ASR settings and API key
/// - DeepSeek chat settings and API key
/// - Polling behavior for asynchronous transcription jobs
#[derive(Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body in bytes
    pub max_request_body_bytes: usize,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: Some("*")
    pub cors_allowed_origins: Option<String>,

    // Outbound HTTP
    /// Timeout for each request sent to a provider
    pub request_timeout_seconds: u64,

    // DashScope ASR
    /// Qwen / DashScope API key used for transcription
    pub qwen_api_key: Option<String>,
    pub dashscope_base_url: String,
    pub dashscope_model: String,
    pub dashscope_language: String,
    pub dashscope_enable_itn: bool,

    // DeepSeek chat
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,

    // Polling
    pub poll_max_attempts: u32,
    pub poll_interval_ms: u64,
    pub poll_missing_result: MissingResultPolicy,
    pub poll_transport_errors: TransportErrorPolicy,
    pub poll_sentinel_text: String,
}

/// Zeroize provider keys when the configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.qwen_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.deepseek_api_key {
            key.zeroize();
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(key: &Option<String>) -> Option<&'static str> {
            key.as_ref().map(|_| "[REDACTED]")
        }

        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_request_body_bytes", &self.max_request_body_bytes)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("qwen_api_key", &redact(&self.qwen_api_key))
            .field("dashscope_base_url", &self.dashscope_base_url)
            .field("dashscope_model", &self.dashscope_model)
            .field("dashscope_language", &self.dashscope_language)
            .field("dashscope_enable_itn", &self.dashscope_enable_itn)
            .field("deepseek_api_key", &redact(&self.deepseek_api_key))
            .field("deepseek_base_url", &self.deepseek_base_url)
            .field("poll_max_attempts", &self.poll_max_attempts)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("poll_missing_result", &self.poll_missing_result)
            .field("poll_transport_errors", &self.poll_transport_errors)
            .field("poll_sentinel_text", &self.poll_sentinel_text)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
            cors_allowed_origins: Some("*".to_string()),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            qwen_api_key: None,
            dashscope_base_url: DASHSCOPE_ASR_URL.to_string(),
            dashscope_model: DEFAULT_MODEL.to_string(),
            dashscope_language: DEFAULT_LANGUAGE.to_string(),
            dashscope_enable_itn: true,
            deepseek_api_key: None,
            deepseek_base_url: DEEPSEEK_CHAT_URL.to_string(),
            poll_max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            poll_missing_result: MissingResultPolicy::default(),
            poll_transport_errors: TransportErrorPolicy::default(),
            poll_sentinel_text: DEFAULT_SENTINEL_TEXT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// The .env file is loaded by `main` before this is called, so values
    /// from it show up here as ordinary environment variables.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or the resulting
    /// configuration fails validation.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        validation::validate_server_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;

        // Environment is the base, YAML overrides it
        let config = merge::merge_config(Some(yaml_config))?;

        validation::validate_server_config(&config)?;

        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Polling parameters for the transcription poller.
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            max_attempts: self.poll_max_attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
            missing_result: self.poll_missing_result,
            transport_errors: self.poll_transport_errors,
            sentinel_text: self.poll_sentinel_text.clone(),
        }
    }

    /// DashScope provider settings. The key is empty when not configured;
    /// provider construction reports that as `ConfigMissing`.
    pub fn dashscope_config(&self) -> DashScopeConfig {
        DashScopeConfig {
            base_url: self.dashscope_base_url.clone(),
            model: self.dashscope_model.clone(),
            language: self.dashscope_language.clone(),
            enable_itn: self.dashscope_enable_itn,
            request_timeout: self.request_timeout(),
            ..DashScopeConfig::new(self.qwen_api_key.clone().unwrap_or_default())
        }
    }

    /// DeepSeek relay settings, with the same empty-key convention as
    /// [`ServerConfig::dashscope_config`].
    pub fn deepseek_config(&self) -> DeepSeekConfig {
        DeepSeekConfig {
            base_url: self.deepseek_base_url.clone(),
            request_timeout: self.request_timeout(),
            ..DeepSeekConfig::new(self.deepseek_api_key.clone().unwrap_or_default())
        }
    }
}
