//! Preview endpoint for uploads that are shown rather than OCR'd.

use axum::extract::{Multipart, State};
use axum::Json;
use billex_core::Preview;

use super::read_upload;
use crate::error::ApiError;
use crate::state::AppState;

/// Show the text of a PDF or plain-text upload, or the size of an image.
///
/// Image-only PDFs are not OCR'd; they come back with a notice instead.
pub async fn preview(
    State(_state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Preview>, ApiError> {
    let document = read_upload(multipart).await?;
    let preview = document.preview()?;

    tracing::info!(
        "Preview of {:?}: {}, {} chars",
        preview.filename,
        preview.kind,
        preview.text.as_ref().map_or(0, |t| t.len())
    );

    Ok(Json(preview))
}
