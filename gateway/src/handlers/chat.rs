use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::errors::AppResult;
use crate::state::AppState;

/// Forward a chat-completion request to DeepSeek and answer with its status
/// and body, including provider errors.
pub async fn chat_completion(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Response> {
    let chat = state.chat()?;
    let Json(body) = payload?;

    let relayed = chat.relay(&body).await?;
    info!("Chat relay finished with HTTP {}", relayed.status);

    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(relayed.body)).into_response())
}
