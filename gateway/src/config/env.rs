use std::env;
use std::fmt::Display;
use std::str::FromStr;

use super::ServerConfig;

/// Read a variable, treating blank values as unset.
pub(super) fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse a variable. Unset yields `Ok(None)`.
pub(super) fn parse_env<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    match env_var(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} ('{raw}'): {e}")),
        None => Ok(None),
    }
}

/// Accepts true/false, 1/0, yes/no, on/off.
pub(super) fn parse_bool(key: &str) -> Result<Option<bool>, String> {
    match env_var(key) {
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(format!("Invalid boolean for {key}: '{raw}'")),
        },
        None => Ok(None),
    }
}

/// Build a configuration from defaults overlaid with environment variables.
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = ServerConfig::default();

    // Server
    if let Some(host) = env_var("HOST") {
        config.host = host;
    }
    if let Some(port) = parse_env("PORT")? {
        config.port = port;
    }
    if let Some(limit) = parse_env("MAX_REQUEST_BODY_BYTES")? {
        config.max_request_body_bytes = limit;
    }
    if let Some(origins) = env_var("CORS_ALLOWED_ORIGINS") {
        config.cors_allowed_origins = Some(origins);
    }
    if let Some(timeout) = parse_env("REQUEST_TIMEOUT_SECONDS")? {
        config.request_timeout_seconds = timeout;
    }

    // DashScope
    config.qwen_api_key = env_var("QWEN_API_KEY");
    if let Some(url) = env_var("DASHSCOPE_BASE_URL") {
        config.dashscope_base_url = url;
    }
    if let Some(model) = env_var("DASHSCOPE_MODEL") {
        config.dashscope_model = model;
    }
    if let Some(language) = env_var("DASHSCOPE_LANGUAGE") {
        config.dashscope_language = language;
    }
    if let Some(enable_itn) = parse_bool("DASHSCOPE_ENABLE_ITN")? {
        config.dashscope_enable_itn = enable_itn;
    }

    // DeepSeek
    config.deepseek_api_key = env_var("DEEPSEEK_API_KEY");
    if let Some(url) = env_var("DEEPSEEK_BASE_URL") {
        config.deepseek_base_url = url;
    }

    // Polling
    if let Some(attempts) = parse_env("POLL_MAX_ATTEMPTS")? {
        config.poll_max_attempts = attempts;
    }
    if let Some(interval) = parse_env("POLL_INTERVAL_MS")? {
        config.poll_interval_ms = interval;
    }
    if let Some(policy) = env_var("POLL_MISSING_RESULT") {
        config.poll_missing_result = policy.parse()?;
    }
    if let Some(policy) = env_var("POLL_TRANSPORT_ERRORS") {
        config.poll_transport_errors = policy.parse()?;
    }
    if let Some(text) = env_var("POLL_SENTINEL_TEXT") {
        config.poll_sentinel_text = text;
    }

    Ok(config)
}
