use super::ServerConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;

/// Environment (with defaults) as the base, YAML values on top.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(limit) = server.max_request_body_bytes {
            config.max_request_body_bytes = limit;
        }
        if let Some(timeout) = server.request_timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
    }

    if let Some(security) = yaml.security
        && let Some(origins) = security.cors_allowed_origins
    {
        config.cors_allowed_origins = Some(origins);
    }

    if let Some(providers) = yaml.providers {
        if providers.qwen_api_key.is_some() {
            config.qwen_api_key = providers.qwen_api_key;
        }
        if providers.deepseek_api_key.is_some() {
            config.deepseek_api_key = providers.deepseek_api_key;
        }
    }

    if let Some(dashscope) = yaml.dashscope {
        if let Some(url) = dashscope.base_url {
            config.dashscope_base_url = url;
        }
        if let Some(model) = dashscope.model {
            config.dashscope_model = model;
        }
        if let Some(language) = dashscope.language {
            config.dashscope_language = language;
        }
        if let Some(enable_itn) = dashscope.enable_itn {
            config.dashscope_enable_itn = enable_itn;
        }
    }

    if let Some(deepseek) = yaml.deepseek
        && let Some(url) = deepseek.base_url
    {
        config.deepseek_base_url = url;
    }

    if let Some(polling) = yaml.polling {
        if let Some(attempts) = polling.max_attempts {
            config.poll_max_attempts = attempts;
        }
        if let Some(interval) = polling.interval_ms {
            config.poll_interval_ms = interval;
        }
        if let Some(policy) = polling.missing_result {
            config.poll_missing_result = policy.parse()?;
        }
        if let Some(policy) = polling.transport_errors {
            config.poll_transport_errors = policy.parse()?;
        }
        if let Some(text) = polling.sentinel_text {
            config.poll_sentinel_text = text;
        }
    }

    Ok(config)
}
