//! Chat-completion relays.

pub mod deepseek;

use serde_json::Value;
use thiserror::Error;

pub use deepseek::{DeepSeekChat, DeepSeekConfig};

/// Provider answer forwarded to the client as-is.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Clone, Error)]
pub enum ChatRelayError {
    #[error("Provider configuration missing: {0}")]
    ConfigMissing(String),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned a non-JSON answer (HTTP {status})")]
    InvalidResponse { status: u16, details: String },
}
