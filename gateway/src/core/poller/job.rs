//! Data model for asynchronous transcription jobs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::error::StatusQueryError;

/// Normalized status of a provider job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Terminal statuses never transition again.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A job submitted to an external provider, tracked for the lifetime of one request.
///
/// The identifier is fixed at construction. Status only moves forward from
/// `Pending` to a terminal status; observations arriving after that are ignored.
#[derive(Debug, Clone)]
pub struct TranscriptionJob {
    id: String,
    status: JobStatus,
    result_text: Option<String>,
    raw_payload: Option<Value>,
}

impl TranscriptionJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Pending,
            result_text: None,
            raw_payload: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Recognized text, only set once the job has succeeded.
    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    /// Last provider payload observed for this job.
    pub fn raw_payload(&self) -> Option<&Value> {
        self.raw_payload.as_ref()
    }

    /// Record a status observation.
    ///
    /// Returns `false` and leaves the job untouched when the job is already
    /// terminal.
    pub fn observe(&mut self, status: JobStatus, result_text: Option<String>, payload: Value) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        self.status = status;
        self.raw_payload = Some(payload);
        if status == JobStatus::Succeeded {
            self.result_text = result_text;
        }
        true
    }
}

/// What a single status query produced.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    Status(JobStatus),
    TransportError(StatusQueryError),
}

/// One iteration of the polling loop.
#[derive(Debug, Clone)]
pub struct PollAttempt {
    /// 0-based attempt index.
    pub index: u32,
    /// Wait that preceded the status query.
    pub waited: Duration,
    pub outcome: AttemptOutcome,
}

impl PollAttempt {
    pub fn is_inconclusive(&self) -> bool {
        match &self.outcome {
            AttemptOutcome::Status(status) => !status.is_terminal(),
            AttemptOutcome::TransportError(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_job_is_pending() {
        let job = TranscriptionJob::new("task-1");
        assert_eq!(job.id(), "task-1");
        assert_eq!(job.status(), JobStatus::Pending);
        assert!(job.result_text().is_none());
        assert!(job.raw_payload().is_none());
    }

    #[test]
    fn test_observe_success_keeps_text() {
        let mut job = TranscriptionJob::new("task-1");
        assert!(job.observe(JobStatus::Pending, None, json!({"n": 1})));
        assert!(job.observe(
            JobStatus::Succeeded,
            Some("hello".to_string()),
            json!({"n": 2})
        ));
        assert_eq!(job.status(), JobStatus::Succeeded);
        assert_eq!(job.result_text(), Some("hello"));
        assert_eq!(job.raw_payload(), Some(&json!({"n": 2})));
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut job = TranscriptionJob::new("task-1");
        job.observe(JobStatus::Failed, None, json!({"reason": "bad audio"}));

        assert!(!job.observe(JobStatus::Pending, None, json!({})));
        assert!(!job.observe(JobStatus::Succeeded, Some("late".into()), json!({})));

        assert_eq!(job.status(), JobStatus::Failed);
        assert!(job.result_text().is_none());
        assert_eq!(job.raw_payload(), Some(&json!({"reason": "bad audio"})));
    }

    #[test]
    fn test_text_ignored_unless_succeeded() {
        let mut job = TranscriptionJob::new("task-1");
        job.observe(JobStatus::Pending, Some("partial".into()), json!({}));
        assert!(job.result_text().is_none());
    }

    #[test]
    fn test_attempt_inconclusive() {
        let pending = PollAttempt {
            index: 0,
            waited: Duration::from_secs(1),
            outcome: AttemptOutcome::Status(JobStatus::Pending),
        };
        let transport = PollAttempt {
            index: 1,
            waited: Duration::from_secs(1),
            outcome: AttemptOutcome::TransportError(StatusQueryError::Network("reset".into())),
        };
        let done = PollAttempt {
            index: 2,
            waited: Duration::from_secs(1),
            outcome: AttemptOutcome::Status(JobStatus::Succeeded),
        };
        assert!(pending.is_inconclusive());
        assert!(transport.is_inconclusive());
        assert!(!done.is_inconclusive());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Succeeded).unwrap(),
            "\"succeeded\""
        );
        assert_eq!(JobStatus::Failed.to_string(), "failed");
        assert!(!JobStatus::Pending.is_terminal());
    }
}
