//! Request and response shapes for the DashScope transcription API.
//!
//! Responses are kept as raw `serde_json::Value` so the full payload can be
//! returned to clients for diagnostics; the helpers here read the few fields
//! the gateway needs.

use serde::Serialize;
use serde_json::Value;

use crate::core::poller::JobStatus;

// =============================================================================
// Submission Request
// =============================================================================

/// Body of an asynchronous transcription submission.
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub model: &'a str,
    pub input: SubmitInput<'a>,
    pub parameters: AsrParameters<'a>,
}

#[derive(Debug, Serialize)]
pub struct SubmitInput<'a> {
    /// Base64-encoded audio.
    pub audio: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AsrParameters<'a> {
    pub language: &'a str,
    pub enable_itn: bool,
}

// =============================================================================
// Task Status
// =============================================================================

/// Task status values reported in `output.task_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Unknown,
}

impl TaskStatus {
    /// Parse a status string. DashScope reports upper-case values; anything
    /// else is treated as still running.
    pub fn parse(s: &str) -> Self {
        match s {
            "PENDING" => Self::Pending,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "CANCELED" => Self::Canceled,
            "UNKNOWN" => Self::Unknown,
            _ => Self::Running,
        }
    }

    /// Map to the poller's status model. Only `SUCCEEDED` and `FAILED` end
    /// the job; `UNKNOWN` is reported while a new task is not yet visible.
    pub fn job_status(&self) -> JobStatus {
        match self {
            Self::Succeeded => JobStatus::Succeeded,
            Self::Failed => JobStatus::Failed,
            Self::Pending | Self::Running | Self::Canceled | Self::Unknown => JobStatus::Pending,
        }
    }
}

// =============================================================================
// Response Accessors
// =============================================================================

/// `output.task_id`
pub fn task_id(payload: &Value) -> Option<String> {
    payload
        .pointer("/output/task_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// `output.task_status`, defaulting to `Running` when absent.
pub fn task_status(payload: &Value) -> TaskStatus {
    payload
        .pointer("/output/task_status")
        .and_then(Value::as_str)
        .map(TaskStatus::parse)
        .unwrap_or(TaskStatus::Running)
}

/// Top-level `request_id`, useful when reporting issues to the provider.
pub fn request_id(payload: &Value) -> Option<&str> {
    payload.get("request_id").and_then(Value::as_str)
}
