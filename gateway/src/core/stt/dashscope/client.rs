//! DashScope ASR client.
//!
//! File transcription on DashScope is asynchronous: the submission (sent with
//! `X-DashScope-Async: enable`) answers with a task id, and the task is then
//! queried with `GET {base_url}/{task_id}` until it finishes. This client
//! performs the two calls; the loop itself lives in
//! [`AsyncJobPoller`](crate::core::poller::AsyncJobPoller).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::config::DashScopeConfig;
use super::messages::{AsrParameters, SubmitInput, SubmitRequest, request_id, task_id, task_status};
use crate::core::poller::{
    JobError, JobProvider, JobStatus, ResultExtractor, StatusQueryError, StatusReport, Submission,
};

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// User-Agent header value for API requests.
const USER_AGENT: &str = concat!("voxrelay-gateway/", env!("CARGO_PKG_VERSION"));

/// Header enabling asynchronous task mode.
const ASYNC_HEADER: &str = "X-DashScope-Async";

pub struct DashScopeAsr {
    config: DashScopeConfig,

    /// HTTP client for API requests (reused for connection pooling).
    http_client: Client,

    extractor: ResultExtractor,
}

impl DashScopeAsr {
    /// Create a client, validating the configuration once.
    ///
    /// Fails with `ConfigMissing` when no API key is set.
    pub fn new(config: DashScopeConfig) -> Result<Self, JobError> {
        if config.api_key.trim().is_empty() {
            return Err(JobError::ConfigMissing(
                "DashScope API key is not configured (QWEN_API_KEY)".to_string(),
            ));
        }
        config.validate().map_err(JobError::InvalidConfig)?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| JobError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
            extractor: ResultExtractor::dashscope(),
        })
    }

    /// Replace the result extraction strategies.
    pub fn with_extractor(mut self, extractor: ResultExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &DashScopeConfig {
        &self.config
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.api_key.as_str())
    }
}

#[async_trait]
impl JobProvider for DashScopeAsr {
    fn name(&self) -> &str {
        "dashscope"
    }

    async fn submit(&self, audio_base64: &str) -> Result<Submission, JobError> {
        let body = SubmitRequest {
            model: &self.config.model,
            input: SubmitInput {
                audio: audio_base64,
            },
            parameters: AsrParameters {
                language: &self.config.language,
                enable_itn: self.config.enable_itn,
            },
        };

        info!(
            "Submitting {} bytes of base64 audio to DashScope (model: {}, language: {})",
            audio_base64.len(),
            self.config.model,
            self.config.language
        );

        let response = self
            .http_client
            .post(&self.config.base_url)
            .header("Authorization", self.bearer())
            .header(ASYNC_HEADER, "enable")
            .json(&body)
            .send()
            .await
            .map_err(|e| JobError::SubmissionFailed {
                status: None,
                details: format!("Request failed: {e}"),
            })?;

        let status = response.status();
        // Status is reported only for error answers
        let response_text = response.text().await.map_err(|e| JobError::SubmissionFailed {
            status: None,
            details: format!("Failed to read response: {e}"),
        })?;

        if !status.is_success() {
            error!("DashScope submission error ({}): {}", status, response_text);
            return Err(JobError::SubmissionFailed {
                status: Some(status.as_u16()),
                details: response_text,
            });
        }

        let payload: Value =
            serde_json::from_str(&response_text).map_err(|e| JobError::SubmissionFailed {
                status: None,
                details: format!("Invalid JSON in submission response: {e}"),
            })?;

        debug!(
            "DashScope submission accepted (request_id: {})",
            request_id(&payload).unwrap_or("-")
        );

        Ok(Submission {
            inline_result: self.extractor.extract_primary(&payload),
            job_id: task_id(&payload),
            payload,
        })
    }

    async fn query_status(&self, job_id: &str) -> Result<StatusReport, StatusQueryError> {
        let response = self
            .http_client
            .get(self.config.task_url(job_id))
            .header("Authorization", self.bearer())
            .send()
            .await
            .map_err(|e| StatusQueryError::Network(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| StatusQueryError::Network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(StatusQueryError::Http {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let payload: Value = serde_json::from_str(&response_text)
            .map_err(|e| StatusQueryError::Decode(e.to_string()))?;

        let task_status = task_status(&payload);
        debug!("DashScope task {} status: {:?}", job_id, task_status);

        let job_status = task_status.job_status();
        let result = if job_status == JobStatus::Succeeded {
            self.extractor.extract(&payload)
        } else {
            None
        };

        Ok(StatusReport {
            status: job_status,
            result,
            payload,
        })
    }
}
