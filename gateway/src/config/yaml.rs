use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present
/// here override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///   max_request_body_bytes: 10485760
///   request_timeout_seconds: 60
///
/// security:
///   cors_allowed_origins: "*"
///
/// providers:
///   qwen_api_key: "your-dashscope-key"
///   deepseek_api_key: "your-deepseek-key"
///
/// dashscope:
///   base_url: "https://dashscope-intl.aliyuncs.com/api/v1/services/audio/asr/transcription"
///   model: "qwen3-asr-flash-filetrans"
///   language: "ru"
///   enable_itn: true
///
/// deepseek:
///   base_url: "https://api.deepseek.com/v1/chat/completions"
///
/// polling:
///   max_attempts: 30
///   interval_ms: 1000
///   missing_result: "sentinel"
///   transport_errors: "count"
///   sentinel_text: "not recognized"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub security: Option<SecurityYaml>,
    pub providers: Option<ProvidersYaml>,
    pub dashscope: Option<DashScopeYaml>,
    pub deepseek: Option<DeepSeekYaml>,
    pub polling: Option<PollingYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_request_body_bytes: Option<usize>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// Comma-separated origins or "*"
    pub cors_allowed_origins: Option<String>,
}

/// Provider API keys from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub qwen_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DashScopeYaml {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub enable_itn: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DeepSeekYaml {
    pub base_url: Option<String>,
}

/// Polling behavior from YAML. Policies are kept as strings and parsed
/// during merge so that aliases like "strict" or "abort" work in both
/// YAML and environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PollingYaml {
    pub max_attempts: Option<u32>,
    pub interval_ms: Option<u64>,
    pub missing_result: Option<String>,
    pub transport_errors: Option<String>,
    pub sentinel_text: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
