use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::core::chat::{ChatRelayError, DeepSeekChat};
use crate::core::poller::JobError;
use crate::core::stt::{DashScopeAsr, SpeechToText};

/// Shared application state.
///
/// Providers are built once at startup. A provider that could not be built
/// (usually a missing API key) keeps its construction error, and the
/// matching endpoint answers with it on every request.
pub struct AppState {
    pub config: ServerConfig,
    pub speech: Result<SpeechToText, JobError>,
    pub chat: Result<Arc<DeepSeekChat>, ChatRelayError>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let speech = DashScopeAsr::new(config.dashscope_config())
            .map(|asr| SpeechToText::new(Arc::new(asr), config.poller_config()));
        match &speech {
            Ok(stt) => info!(
                "Speech-to-text enabled via {} (up to {} status queries every {} ms)",
                stt.provider_name(),
                config.poll_max_attempts,
                config.poll_interval_ms
            ),
            Err(e) => warn!("Speech-to-text disabled: {}", e),
        }

        let chat = DeepSeekChat::new(config.deepseek_config()).map(Arc::new);
        match &chat {
            Ok(_) => info!("Chat relay enabled via DeepSeek"),
            Err(e) => warn!("Chat relay disabled: {}", e),
        }

        Arc::new(Self {
            config,
            speech,
            chat,
        })
    }

    /// Assemble state from already-built components.
    pub fn with_providers(
        config: ServerConfig,
        speech: Result<SpeechToText, JobError>,
        chat: Result<Arc<DeepSeekChat>, ChatRelayError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            speech,
            chat,
        })
    }

    pub fn speech(&self) -> Result<&SpeechToText, JobError> {
        self.speech.as_ref().map_err(Clone::clone)
    }

    pub fn chat(&self) -> Result<&DeepSeekChat, ChatRelayError> {
        self.chat.as_deref().map_err(Clone::clone)
    }
}
