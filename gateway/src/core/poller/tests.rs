//! Tests for the job poller using a scripted in-memory provider.

use super::*;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// =============================================================================
// Scripted provider
// =============================================================================

enum Scripted {
    Pending,
    Succeeded(Option<&'static str>),
    Failed,
    TransportError,
}

struct ScriptedProvider {
    submission: Result<Submission, JobError>,
    script: Mutex<VecDeque<Scripted>>,
    submits: AtomicUsize,
    queries: AtomicUsize,
}

impl ScriptedProvider {
    fn with_job(job_id: &str, script: Vec<Scripted>) -> Self {
        Self::new(
            Ok(Submission {
                inline_result: None,
                job_id: Some(job_id.to_string()),
                payload: json!({"output": {"task_id": job_id, "task_status": "PENDING"}}),
            }),
            script,
        )
    }

    fn new(submission: Result<Submission, JobError>, script: Vec<Scripted>) -> Self {
        Self {
            submission,
            script: Mutex::new(script.into()),
            submits: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
        }
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn submit(&self, _audio_base64: &str) -> Result<Submission, JobError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.submission.clone()
    }

    async fn query_status(&self, job_id: &str) -> Result<StatusReport, StatusQueryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::Pending);

        let payload = |status: &str| json!({"output": {"task_id": job_id, "task_status": status}});
        match next {
            Scripted::Pending => Ok(StatusReport::pending(payload("RUNNING"))),
            Scripted::Succeeded(text) => {
                let mut body = payload("SUCCEEDED");
                if let Some(text) = text {
                    body["output"]["transcription"] = Value::from(text);
                }
                Ok(StatusReport {
                    status: JobStatus::Succeeded,
                    result: ResultExtractor::dashscope().extract(&body),
                    payload: body,
                })
            }
            Scripted::Failed => Ok(StatusReport {
                status: JobStatus::Failed,
                result: None,
                payload: payload("FAILED"),
            }),
            Scripted::TransportError => {
                Err(StatusQueryError::Network("connection reset".to_string()))
            }
        }
    }
}

fn pendings(k: usize) -> Vec<Scripted> {
    (0..k).map(|_| Scripted::Pending).collect()
}

fn fast_poller() -> AsyncJobPoller {
    AsyncJobPoller::new(PollerConfig {
        interval: Duration::from_millis(1),
        ..Default::default()
    })
}

// =============================================================================
// Submission outcomes
// =============================================================================

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_inline_result_short_circuits() {
        let provider = ScriptedProvider::new(
            Ok(Submission {
                inline_result: Some("привет".to_string()),
                job_id: Some("task-ignored".to_string()),
                payload: json!({"output": {"transcription": "привет"}}),
            }),
            vec![Scripted::Failed],
        );

        let text = fast_poller().run(&provider, "AAAA").await.unwrap();

        assert_eq!(text, "привет");
        assert_eq!(provider.submits(), 1);
        assert_eq!(provider.queries(), 0);
    }

    #[tokio::test]
    async fn test_missing_job_id_fails_without_queries() {
        let payload = json!({"output": {"task_status": "PENDING"}, "request_id": "r-1"});
        let provider = ScriptedProvider::new(
            Ok(Submission {
                inline_result: None,
                job_id: None,
                payload: payload.clone(),
            }),
            vec![],
        );

        let err = fast_poller().run(&provider, "AAAA").await.unwrap_err();

        match err {
            JobError::MissingJobId { payload: got } => assert_eq!(got, payload),
            other => panic!("expected MissingJobId, got {other:?}"),
        }
        assert_eq!(provider.queries(), 0);
    }

    #[tokio::test]
    async fn test_submission_failure_is_fatal() {
        let provider = ScriptedProvider::new(
            Err(JobError::SubmissionFailed {
                status: Some(401),
                details: "Invalid API-key provided.".to_string(),
            }),
            vec![Scripted::Succeeded(Some("never"))],
        );

        let err = fast_poller().run(&provider, "AAAA").await.unwrap_err();

        assert!(matches!(
            err,
            JobError::SubmissionFailed {
                status: Some(401),
                ..
            }
        ));
        assert_eq!(provider.submits(), 1);
        assert_eq!(provider.queries(), 0);
    }
}

// =============================================================================
// Polling outcomes
// =============================================================================

mod polling_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_success_after_k_pending() {
        for k in [0usize, 1, 5, 29] {
            let mut script = pendings(k);
            script.push(Scripted::Succeeded(Some("готово")));
            let provider = ScriptedProvider::with_job("task-1", script);

            let text = AsyncJobPoller::default()
                .run(&provider, "AAAA")
                .await
                .unwrap();

            assert_eq!(text, "готово");
            assert_eq!(provider.queries(), k + 1, "k = {k}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_budget() {
        let provider = ScriptedProvider::with_job("task-1", pendings(30));
        let started = tokio::time::Instant::now();

        let err = AsyncJobPoller::default()
            .run(&provider, "AAAA")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            JobError::Timeout {
                ref job_id,
                attempts: 30
            } if job_id == "task-1"
        ));
        assert_eq!(provider.queries(), 30);
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_interval_before_each_query() {
        let mut script = pendings(2);
        script.push(Scripted::Succeeded(Some("ok")));
        let provider = ScriptedProvider::with_job("task-1", script);
        let started = tokio::time::Instant::now();

        AsyncJobPoller::default()
            .run(&provider, "AAAA")
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_failed_terminates_immediately() {
        let mut script = pendings(2);
        script.push(Scripted::Failed);
        script.push(Scripted::Succeeded(Some("too late")));
        let provider = ScriptedProvider::with_job("task-9", script);

        let err = fast_poller().run(&provider, "AAAA").await.unwrap_err();

        match err {
            JobError::JobFailed { job_id, payload } => {
                assert_eq!(job_id, "task-9");
                assert_eq!(payload["output"]["task_status"], "FAILED");
            }
            other => panic!("expected JobFailed, got {other:?}"),
        }
        assert_eq!(provider.queries(), 3);
    }

    #[tokio::test]
    async fn test_custom_budget() {
        let poller = AsyncJobPoller::new(PollerConfig {
            max_attempts: 3,
            interval: Duration::from_millis(1),
            ..Default::default()
        });
        let provider = ScriptedProvider::with_job("task-1", pendings(10));

        let err = poller.run(&provider, "AAAA").await.unwrap_err();

        assert!(matches!(err, JobError::Timeout { attempts: 3, .. }));
        assert_eq!(provider.queries(), 3);
    }

    #[tokio::test]
    async fn test_poll_updates_job() {
        let provider = ScriptedProvider::with_job(
            "task-7",
            vec![Scripted::Pending, Scripted::Succeeded(Some("done"))],
        );
        let mut job = TranscriptionJob::new("task-7");

        let text = fast_poller().poll(&provider, &mut job).await.unwrap();

        assert_eq!(text, "done");
        assert_eq!(job.status(), JobStatus::Succeeded);
        assert_eq!(job.result_text(), Some("done"));
        assert_eq!(job.raw_payload().unwrap()["output"]["task_status"], "SUCCEEDED");
    }
}

// =============================================================================
// Missing result policy
// =============================================================================

mod missing_result_tests {
    use super::*;

    #[tokio::test]
    async fn test_sentinel_policy_is_default() {
        let provider = ScriptedProvider::with_job("task-1", vec![Scripted::Succeeded(None)]);

        let text = fast_poller().run(&provider, "AAAA").await.unwrap();

        assert_eq!(text, DEFAULT_SENTINEL_TEXT);
    }

    #[tokio::test]
    async fn test_custom_sentinel_text() {
        let poller = AsyncJobPoller::new(PollerConfig {
            interval: Duration::from_millis(1),
            sentinel_text: "Текст не распознан".to_string(),
            ..Default::default()
        });
        let provider = ScriptedProvider::with_job("task-1", vec![Scripted::Succeeded(None)]);

        assert_eq!(
            poller.run(&provider, "AAAA").await.unwrap(),
            "Текст не распознан"
        );
    }

    #[tokio::test]
    async fn test_error_policy() {
        let poller = AsyncJobPoller::new(PollerConfig {
            interval: Duration::from_millis(1),
            missing_result: MissingResultPolicy::Error,
            ..Default::default()
        });
        let provider = ScriptedProvider::with_job(
            "task-1",
            vec![Scripted::Pending, Scripted::Succeeded(None)],
        );

        let err = poller.run(&provider, "AAAA").await.unwrap_err();

        match err {
            JobError::ResultMissing { job_id, payload } => {
                assert_eq!(job_id, "task-1");
                assert_eq!(payload["output"]["task_status"], "SUCCEEDED");
            }
            other => panic!("expected ResultMissing, got {other:?}"),
        }
        assert_eq!(provider.queries(), 2);
    }
}

// =============================================================================
// Transport error policy
// =============================================================================

mod transport_error_tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_errors_consume_budget() {
        let provider = ScriptedProvider::with_job(
            "task-1",
            vec![
                Scripted::TransportError,
                Scripted::Pending,
                Scripted::TransportError,
                Scripted::Succeeded(Some("through the noise")),
            ],
        );

        let text = fast_poller().run(&provider, "AAAA").await.unwrap();

        assert_eq!(text, "through the noise");
        assert_eq!(provider.queries(), 4);
    }

    #[tokio::test]
    async fn test_transport_errors_alone_time_out() {
        let poller = AsyncJobPoller::new(PollerConfig {
            max_attempts: 4,
            interval: Duration::from_millis(1),
            ..Default::default()
        });
        let provider = ScriptedProvider::with_job(
            "task-1",
            (0..10).map(|_| Scripted::TransportError).collect(),
        );

        let err = poller.run(&provider, "AAAA").await.unwrap_err();

        assert!(matches!(err, JobError::Timeout { attempts: 4, .. }));
        assert_eq!(provider.queries(), 4);
    }

    #[tokio::test]
    async fn test_abort_policy() {
        let poller = AsyncJobPoller::new(PollerConfig {
            interval: Duration::from_millis(1),
            transport_errors: TransportErrorPolicy::Abort,
            ..Default::default()
        });
        let provider = ScriptedProvider::with_job(
            "task-1",
            vec![
                Scripted::Pending,
                Scripted::TransportError,
                Scripted::Succeeded(Some("unreached")),
            ],
        );

        let err = poller.run(&provider, "AAAA").await.unwrap_err();

        match err {
            JobError::StatusQueryFailed { job_id, source } => {
                assert_eq!(job_id, "task-1");
                assert!(matches!(source, StatusQueryError::Network(_)));
            }
            other => panic!("expected StatusQueryFailed, got {other:?}"),
        }
        assert_eq!(provider.queries(), 2);
    }
}

// =============================================================================
// State machine
// =============================================================================

#[test]
fn test_terminal_states() {
    assert!(!PollerState::Submitted.is_terminal());
    assert!(!PollerState::Polling { attempt: 3 }.is_terminal());
    assert!(PollerState::Succeeded("x".into()).is_terminal());
    assert!(PollerState::Failed(json!({})).is_terminal());
    assert!(PollerState::TimedOut.is_terminal());
}
