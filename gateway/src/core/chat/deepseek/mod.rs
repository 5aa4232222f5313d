//! DeepSeek chat-completion relay.
//!
//! The request body is forwarded unchanged to the OpenAI-compatible
//! `/v1/chat/completions` endpoint and the answer is passed back with the
//! provider's status code.
//!
//! ```bash
//! export DEEPSEEK_API_KEY="sk-..."
//! ```

mod client;
pub mod config;

pub use client::DeepSeekChat;
pub use config::{DEEPSEEK_CHAT_URL, DeepSeekConfig};
