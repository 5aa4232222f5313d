pub mod chat;
pub mod poller;
pub mod stt;

// Re-export commonly used types for convenience
pub use chat::{ChatRelayError, DeepSeekChat, DeepSeekConfig, RelayedResponse};
pub use poller::{
    AsyncJobPoller, JobError, JobProvider, JobStatus, MissingResultPolicy, PollerConfig,
    StatusQueryError, TranscriptionJob, TransportErrorPolicy,
};
pub use stt::{DashScopeAsr, DashScopeConfig, SpeechToText};
