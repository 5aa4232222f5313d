//! Speech-to-text providers.
//!
//! Providers here expose asynchronous transcription jobs through the
//! [`JobProvider`] capability; [`SpeechToText`] pairs one with a poller.

pub mod dashscope;

use std::sync::Arc;
use tracing::info;

use crate::core::poller::{AsyncJobPoller, JobError, JobProvider, PollerConfig};

pub use dashscope::{DashScopeAsr, DashScopeConfig};

/// A job provider together with the polling policy used for it.
#[derive(Clone)]
pub struct SpeechToText {
    provider: Arc<dyn JobProvider>,
    poller: AsyncJobPoller,
}

impl SpeechToText {
    pub fn new(provider: Arc<dyn JobProvider>, poller_config: PollerConfig) -> Self {
        Self {
            provider,
            poller: AsyncJobPoller::new(poller_config),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn poller(&self) -> &AsyncJobPoller {
        &self.poller
    }

    /// Transcribe base64-encoded audio, waiting for the provider job to finish.
    pub async fn transcribe(&self, audio_base64: &str) -> Result<String, JobError> {
        let text = self.poller.run(self.provider.as_ref(), audio_base64).await?;
        info!(
            "Transcription via {} complete: {} characters",
            self.provider.name(),
            text.chars().count()
        );
        Ok(text)
    }
}

impl std::fmt::Debug for SpeechToText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechToText")
            .field("provider", &self.provider.name())
            .field("poller", &self.poller)
            .finish()
    }
}
