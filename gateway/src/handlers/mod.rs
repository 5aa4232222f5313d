//! HTTP request handlers
//!
//! - `api` - Health check, preflight and method fallback
//! - `speech` - Speech-to-text over an asynchronous provider job
//! - `chat` - Chat-completion relay

pub mod api;
pub mod chat;
pub mod speech;
