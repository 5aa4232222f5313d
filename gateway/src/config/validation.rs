use super::ServerConfig;

/// Run every check against a fully merged configuration.
///
/// Missing provider keys are not an error here: the gateway starts without
/// them and the affected endpoint answers with a configuration error.
pub(super) fn validate_server_config(
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_server_settings(config)?;
    validate_cors_origins(&config.cors_allowed_origins)?;
    validate_provider_url("DashScope", &config.dashscope_base_url)?;
    validate_provider_url("DeepSeek", &config.deepseek_base_url)?;

    if config.dashscope_model.trim().is_empty() {
        return Err("DashScope model must not be empty".into());
    }

    config.poller_config().validate()?;

    Ok(())
}

pub(super) fn validate_server_settings(config: &ServerConfig) -> Result<(), String> {
    if config.host.trim().is_empty() {
        return Err("HOST must not be empty".to_string());
    }

    if config.max_request_body_bytes == 0 {
        return Err("MAX_REQUEST_BODY_BYTES must be greater than zero".to_string());
    }

    if config.request_timeout_seconds == 0 {
        return Err("REQUEST_TIMEOUT_SECONDS must be greater than zero".to_string());
    }

    Ok(())
}

/// `"*"` or a comma-separated list of absolute origins.
pub(super) fn validate_cors_origins(origins: &Option<String>) -> Result<(), String> {
    let Some(origins) = origins else {
        return Ok(());
    };

    if origins.trim() == "*" {
        return Ok(());
    }

    let mut count = 0;
    for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        let parsed = url::Url::parse(origin)
            .map_err(|e| format!("Invalid CORS origin '{origin}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("CORS origin '{origin}' must use http or https"));
        }
        count += 1;
    }

    if count == 0 {
        return Err("CORS_ALLOWED_ORIGINS is set but lists no origins".to_string());
    }

    Ok(())
}

pub(super) fn validate_provider_url(provider: &str, raw: &str) -> Result<(), String> {
    let url =
        url::Url::parse(raw).map_err(|e| format!("Invalid {provider} base URL '{raw}': {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "{provider} base URL must use http or https, got '{}'",
            url.scheme()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_server_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_cors_wildcard_and_lists() {
        assert!(validate_cors_origins(&None).is_ok());
        assert!(validate_cors_origins(&Some("*".to_string())).is_ok());
        assert!(
            validate_cors_origins(&Some(
                "https://a.example.com, http://localhost:5173".to_string()
            ))
            .is_ok()
        );
    }

    #[test]
    fn test_cors_rejects_garbage() {
        let err = validate_cors_origins(&Some("not an origin".to_string())).unwrap_err();
        assert!(err.contains("Invalid CORS origin"));

        let err = validate_cors_origins(&Some(" , ".to_string())).unwrap_err();
        assert!(err.contains("lists no origins"));

        let err = validate_cors_origins(&Some("ws://a.example.com".to_string())).unwrap_err();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn test_provider_url() {
        assert!(validate_provider_url("DeepSeek", "https://api.deepseek.com/v1").is_ok());
        assert!(
            validate_provider_url("DeepSeek", "nope")
                .unwrap_err()
                .contains("Invalid DeepSeek base URL")
        );
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = ServerConfig::default();
        config.max_request_body_bytes = 0;
        assert!(validate_server_settings(&config).is_err());

        let mut config = ServerConfig::default();
        config.request_timeout_seconds = 0;
        assert!(validate_server_settings(&config).is_err());
    }

    #[test]
    fn test_poller_settings_checked() {
        let mut config = ServerConfig::default();
        config.poll_interval_ms = 0;

        let err = validate_server_config(&config).unwrap_err();
        assert!(err.to_string().contains("Poll interval"));
    }

    #[test]
    fn test_missing_keys_are_allowed() {
        let mut config = ServerConfig::default();
        config.qwen_api_key = None;
        config.deepseek_api_key = None;

        assert!(validate_server_config(&config).is_ok());
    }
}
