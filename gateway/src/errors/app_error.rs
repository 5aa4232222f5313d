use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, warn};

use crate::core::chat::ChatRelayError;
use crate::core::poller::JobError;

pub type AppResult<T> = Result<T, AppError>;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// Body could not be read or parsed; keeps the extractor's status (400, 413, 415, 422).
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Method not allowed, use POST")]
    MethodNotAllowed,

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Chat(#[from] ChatRelayError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBody { status, .. } => *status,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Job(err) => match err {
                JobError::ConfigMissing(_)
                | JobError::InvalidConfig(_)
                | JobError::MissingJobId { .. }
                | JobError::JobFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                // Provider error statuses are forwarded as-is; anything else is a bad gateway
                JobError::SubmissionFailed { status, .. } => status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                JobError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
                JobError::ResultMissing { .. } | JobError::StatusQueryFailed { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Chat(err) => match err {
                ChatRelayError::ConfigMissing(_) | ChatRelayError::InvalidConfig(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                ChatRelayError::Network(_) | ChatRelayError::InvalidResponse { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    /// JSON body: always an `error` message, plus diagnostics where available.
    fn body(&self) -> Value {
        let message = self.to_string();
        match self {
            Self::Job(JobError::SubmissionFailed { details, .. }) => {
                json!({ "error": message, "details": details })
            }
            Self::Job(JobError::MissingJobId { payload }) => {
                json!({ "error": message, "data": payload })
            }
            Self::Job(JobError::JobFailed { payload, .. })
            | Self::Job(JobError::ResultMissing { payload, .. }) => {
                json!({ "error": message, "details": payload })
            }
            Self::Job(JobError::StatusQueryFailed { source, .. }) => {
                json!({ "error": message, "details": source.to_string() })
            }
            Self::Chat(ChatRelayError::InvalidResponse { details, .. }) => {
                json!({ "error": message, "details": details })
            }
            _ => json!({ "error": message }),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }

        (status, Json(self.body())).into_response()
    }
}
