use serde_json::Value;
use thiserror::Error;

/// Failure of a single status query.
///
/// These are per-attempt errors; whether they end the polling loop depends on
/// the configured [`TransportErrorPolicy`](super::TransportErrorPolicy).
#[derive(Debug, Clone, Error)]
pub enum StatusQueryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Status endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode status response: {0}")]
    Decode(String),
}

/// Failures surfaced by the job poller and its providers.
#[derive(Debug, Clone, Error)]
pub enum JobError {
    #[error("Provider configuration missing: {0}")]
    ConfigMissing(String),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    /// Transport or HTTP failure on the initial submission. `status` carries
    /// the provider's error status and is `None` when no usable answer arrived.
    #[error("Job submission failed{}: {details}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    SubmissionFailed { status: Option<u16>, details: String },

    #[error("Submission response carried neither a result nor a job identifier")]
    MissingJobId { payload: Value },

    #[error("Job {job_id} reported failure")]
    JobFailed { job_id: String, payload: Value },

    #[error("Job {job_id} did not finish after {attempts} status queries")]
    Timeout { job_id: String, attempts: u32 },

    #[error("Job {job_id} succeeded without an extractable result")]
    ResultMissing { job_id: String, payload: Value },

    #[error("Status query for job {job_id} failed: {source}")]
    StatusQueryFailed {
        job_id: String,
        #[source]
        source: StatusQueryError,
    },
}

impl JobError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigMissing(_) => "config_missing",
            Self::InvalidConfig(_) => "invalid_config",
            Self::SubmissionFailed { .. } => "submission_failed",
            Self::MissingJobId { .. } => "missing_job_id",
            Self::JobFailed { .. } => "job_failed",
            Self::Timeout { .. } => "timeout",
            Self::ResultMissing { .. } => "result_missing",
            Self::StatusQueryFailed { .. } => "status_query_failed",
        }
    }

    /// Provider payload retained for diagnostics, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::MissingJobId { payload }
            | Self::JobFailed { payload, .. }
            | Self::ResultMissing { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
