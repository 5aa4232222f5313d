use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

#[derive(Debug, Deserialize)]
pub struct SpeechToTextRequest {
    /// Base64-encoded audio
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechToTextResponse {
    pub text: String,
}

/// Transcribe a base64 audio payload.
///
/// Holds the request open while the provider job is polled; with the default
/// budget that can take about 30 seconds.
pub async fn speech_to_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeechToTextRequest>, JsonRejection>,
) -> AppResult<Json<SpeechToTextResponse>> {
    // Provider configuration is checked before the body
    let speech = state.speech()?;
    let Json(request) = payload?;

    let audio = request
        .audio
        .filter(|audio| !audio.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("no audio data".to_string()))?;

    let decoded_len = decoded_audio_len(&audio)
        .map_err(|e| AppError::BadRequest(format!("audio is not valid base64: {e}")))?;
    debug!("Received {} bytes of audio", decoded_len);

    info!("Submitting audio to {}", speech.provider_name());
    let text = speech.transcribe(&audio).await?;

    Ok(Json(SpeechToTextResponse { text }))
}

/// Decoded size of `audio`. Padding and line breaks are optional and the
/// URL-safe alphabet is accepted; the text itself is forwarded unchanged.
fn decoded_audio_len(audio: &str) -> Result<usize, base64::DecodeError> {
    let compact: String = audio.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD_LENIENT
        .decode(&compact)
        .or_else(|_| URL_SAFE_LENIENT.decode(&compact))
        .map(|bytes| bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_audio_len_accepts_loose_encodings() {
        assert_eq!(decoded_audio_len("UklGRg==").unwrap(), 4);
        assert_eq!(decoded_audio_len("UklGRg").unwrap(), 4);
        assert_eq!(decoded_audio_len("Ukl\nGRg==").unwrap(), 4);
        assert_eq!(decoded_audio_len("_-8_-w").unwrap(), 4);
    }

    #[test]
    fn test_decoded_audio_len_rejects_garbage() {
        assert!(decoded_audio_len("this is not base64!").is_err());
    }
}
