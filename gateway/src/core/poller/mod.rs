//! Asynchronous job poller.
//!
//! Some speech-recognition providers answer a transcription request with a
//! job identifier instead of the text. The poller submits the job once, then
//! queries its status at a fixed interval until the provider reports a
//! terminal status or the attempt budget runs out.
//!
//! ```text
//! Submitted ──inline result──────────────────────────▶ Succeeded
//!     │
//!     ▼
//! Polling{0} ─pending / tolerated transport error─▶ Polling{n+1}
//!     │                                                │
//!     ├──succeeded──▶ Succeeded                        │
//!     ├──failed─────▶ Failed                           │
//!     └──────────────────── n == max_attempts ─────────┴──▶ TimedOut
//! ```
//!
//! # Hosting constraints
//!
//! The loop holds the HTTP request open for up to
//! `interval * max_attempts`. Serverless or proxy environments often cut
//! requests after 10-60 seconds; when that limit is shorter than the poll
//! budget the request is aborted from outside before `Timeout` fires, and
//! the job is left running at the provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use voxrelay_gateway::core::poller::{AsyncJobPoller, PollerConfig};
//! use voxrelay_gateway::core::stt::dashscope::{DashScopeAsr, DashScopeConfig};
//!
//! let provider = DashScopeAsr::new(DashScopeConfig::new("sk-..."))?;
//! let poller = AsyncJobPoller::new(PollerConfig::default());
//! let text = poller.run(&provider, &audio_base64).await?;
//! ```

mod config;
mod error;
mod extract;
mod job;
mod machine;
mod provider;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, DEFAULT_SENTINEL_TEXT, MissingResultPolicy,
    PollerConfig, TransportErrorPolicy,
};
pub use error::{JobError, StatusQueryError};
pub use extract::{ExtractStrategy, ResultExtractor, first_result_transcription, output_transcription};
pub use job::{AttemptOutcome, JobStatus, PollAttempt, TranscriptionJob};
pub use machine::{AsyncJobPoller, PollerState};
pub use provider::{JobProvider, StatusReport, Submission};
