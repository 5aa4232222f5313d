//! DashScope (Alibaba Cloud Model Studio) Qwen ASR provider.
//!
//! Transcribes base64-encoded audio through the asynchronous file
//! transcription API. Submissions return a task id which is polled by the
//! [`AsyncJobPoller`](crate::core::poller::AsyncJobPoller).
//!
//! # Configuration
//!
//! ```bash
//! export QWEN_API_KEY="sk-..."
//! export DASHSCOPE_LANGUAGE="ru"
//! ```
//!
//! # References
//!
//! - [Qwen speech recognition](https://www.alibabacloud.com/help/en/model-studio/qwen-speech-recognition)

mod client;
pub mod config;
pub mod messages;


pub use client::DashScopeAsr;
pub use config::{DASHSCOPE_ASR_URL, DEFAULT_LANGUAGE, DEFAULT_MODEL, DashScopeConfig};
pub use messages::TaskStatus;
