use async_trait::async_trait;
use serde_json::Value;

use super::error::{JobError, StatusQueryError};
use super::job::JobStatus;

/// What the provider answered to a job submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Result returned directly in the submission response, if any.
    pub inline_result: Option<String>,
    /// Identifier to poll with when no inline result was returned.
    pub job_id: Option<String>,
    /// Raw submission response.
    pub payload: Value,
}

/// Provider answer to a single status query.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub status: JobStatus,
    /// Extracted text. Only meaningful for `JobStatus::Succeeded`.
    pub result: Option<String>,
    pub payload: Value,
}

impl StatusReport {
    pub fn pending(payload: Value) -> Self {
        Self {
            status: JobStatus::Pending,
            result: None,
            payload,
        }
    }
}

/// Capability offered by an asynchronous job provider.
///
/// Implementations perform the outbound calls; the poller decides what to do
/// with the answers.
#[async_trait]
pub trait JobProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Submit a job carrying base64-encoded audio. Called exactly once per job.
    async fn submit(&self, audio_base64: &str) -> Result<Submission, JobError>;

    /// Query the current status of a previously submitted job.
    async fn query_status(&self, job_id: &str) -> Result<StatusReport, StatusQueryError>;
}
