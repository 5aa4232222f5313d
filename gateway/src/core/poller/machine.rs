//! The polling state machine.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::config::{MissingResultPolicy, PollerConfig, TransportErrorPolicy};
use super::error::JobError;
use super::job::{AttemptOutcome, JobStatus, PollAttempt, TranscriptionJob};
use super::provider::JobProvider;

/// States of a single job's lifecycle inside the poller.
#[derive(Debug, Clone, PartialEq)]
pub enum PollerState {
    /// Submission sent, answer not yet inspected.
    Submitted,
    /// Waiting for a terminal status; `attempt` queries were already issued.
    Polling { attempt: u32 },
    Succeeded(String),
    Failed(Value),
    TimedOut,
}

impl PollerState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded(_) | Self::Failed(_) | Self::TimedOut
        )
    }
}

/// Submits a job once and polls its status at a fixed interval until it
/// reaches a terminal status or the attempt budget runs out.
///
/// The wait between queries is a `tokio::time::sleep`, so it only suspends
/// the calling task. Dropping the returned future abandons the job without
/// any cleanup call to the provider.
#[derive(Debug, Clone, Default)]
pub struct AsyncJobPoller {
    config: PollerConfig,
}

impl AsyncJobPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Submit a job and wait for its result text.
    pub async fn run<P>(&self, provider: &P, audio_base64: &str) -> Result<String, JobError>
    where
        P: JobProvider + ?Sized,
    {
        let submission = provider.submit(audio_base64).await?;
        debug!("{} submission state: {:?}", provider.name(), PollerState::Submitted);

        if let Some(text) = submission.inline_result {
            info!(
                "{} returned an inline result ({} chars), skipping polling",
                provider.name(),
                text.chars().count()
            );
            return Ok(text);
        }

        let job_id = submission.job_id.ok_or(JobError::MissingJobId {
            payload: submission.payload,
        })?;

        let mut job = TranscriptionJob::new(job_id);
        self.poll(provider, &mut job).await
    }

    /// Poll an already submitted job.
    pub async fn poll<P>(&self, provider: &P, job: &mut TranscriptionJob) -> Result<String, JobError>
    where
        P: JobProvider + ?Sized,
    {
        info!(
            "Polling {} job {} (max {} attempts, every {:?})",
            provider.name(),
            job.id(),
            self.config.max_attempts,
            self.config.interval
        );

        let mut state = PollerState::Polling { attempt: 0 };

        loop {
            state = match state {
                PollerState::Polling { attempt } if attempt >= self.config.max_attempts => {
                    PollerState::TimedOut
                }
                PollerState::Polling { attempt } => self.step(provider, job, attempt).await?,
                PollerState::Succeeded(text) => return Ok(text),
                PollerState::Failed(payload) => {
                    warn!("{} job {} failed", provider.name(), job.id());
                    return Err(JobError::JobFailed {
                        job_id: job.id().to_string(),
                        payload,
                    });
                }
                PollerState::TimedOut => {
                    warn!(
                        "{} job {} still pending after {} attempts, giving up",
                        provider.name(),
                        job.id(),
                        self.config.max_attempts
                    );
                    return Err(JobError::Timeout {
                        job_id: job.id().to_string(),
                        attempts: self.config.max_attempts,
                    });
                }
                PollerState::Submitted => PollerState::Polling { attempt: 0 },
            };
        }
    }

    /// Wait, query once, and compute the next state.
    async fn step<P>(
        &self,
        provider: &P,
        job: &mut TranscriptionJob,
        attempt: u32,
    ) -> Result<PollerState, JobError>
    where
        P: JobProvider + ?Sized,
    {
        tokio::time::sleep(self.config.interval).await;

        let report = match provider.query_status(job.id()).await {
            Ok(report) => report,
            Err(e) => {
                let record = PollAttempt {
                    index: attempt,
                    waited: self.config.interval,
                    outcome: AttemptOutcome::TransportError(e.clone()),
                };
                return match self.config.transport_errors {
                    TransportErrorPolicy::CountAttempt => {
                        warn!(
                            "Status query {} for job {} failed, counting as inconclusive: {}",
                            record.index + 1,
                            job.id(),
                            e
                        );
                        Ok(PollerState::Polling {
                            attempt: attempt + 1,
                        })
                    }
                    TransportErrorPolicy::Abort => Err(JobError::StatusQueryFailed {
                        job_id: job.id().to_string(),
                        source: e,
                    }),
                };
            }
        };

        let record = PollAttempt {
            index: attempt,
            waited: self.config.interval,
            outcome: AttemptOutcome::Status(report.status),
        };
        debug!(
            "Job {} attempt {}: status {}",
            job.id(),
            record.index + 1,
            report.status
        );

        job.observe(report.status, report.result.clone(), report.payload.clone());

        match report.status {
            JobStatus::Pending => Ok(PollerState::Polling {
                attempt: attempt + 1,
            }),
            JobStatus::Failed => Ok(PollerState::Failed(report.payload)),
            JobStatus::Succeeded => match report.result {
                Some(text) => {
                    info!(
                        "Job {} succeeded after {} status queries",
                        job.id(),
                        attempt + 1
                    );
                    Ok(PollerState::Succeeded(text))
                }
                None => match self.config.missing_result {
                    MissingResultPolicy::Sentinel => {
                        warn!(
                            "Job {} succeeded without a transcription, answering with sentinel",
                            job.id()
                        );
                        Ok(PollerState::Succeeded(self.config.sentinel_text.clone()))
                    }
                    MissingResultPolicy::Error => Err(JobError::ResultMissing {
                        job_id: job.id().to_string(),
                        payload: report.payload,
                    }),
                },
            },
        }
    }
}
