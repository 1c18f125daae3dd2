//! OCR-and-translate endpoint.

use axum::extract::{Multipart, State};
use axum::Json;
use billex_core::OcrResponse;

use super::read_upload;
use crate::error::ApiError;
use crate::state::AppState;

/// OCR a bill image, extract its fields and translate the results.
pub async fn ocr(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>, ApiError> {
    let document = read_upload(multipart).await?;
    tracing::info!(
        "OCR request for {:?} ({} bytes, {})",
        document.filename,
        document.bytes.len(),
        document.kind
    );

    let response = state.orchestrator().process_document(document).await?;
    Ok(Json(response))
}
