//! Text-to-speech endpoint.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use billex_core::Language;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    /// ISO code or language name; the configured target language when absent.
    #[serde(default)]
    pub language: Option<String>,
}

/// Synthesize speech and return the raw audio with its MIME type.
pub async fn speak(
    State(state): State<AppState>,
    Json(request): Json<SpeakRequest>,
) -> Result<Response, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    let language = match request.language.as_deref() {
        Some(name) => name
            .parse::<Language>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => state.default_language(),
    };

    let audio = state.speech().speak(&request.text, language).await?;
    tracing::info!(
        "Synthesized {} bytes of {} in {}",
        audio.bytes.len(),
        audio.content_type,
        language
    );

    Ok(([(header::CONTENT_TYPE, audio.content_type)], audio.bytes).into_response())
}
