//! HTTP routes.
//!
//! Endpoints:
//! - POST /ocr - OCR, extract and translate an uploaded bill image
//! - POST /chat - Answer a question about the bill
//! - POST /speak - Read text aloud in a language
//! - POST /preview - Show the text of a PDF or plain-text upload
//! - GET /languages - Supported languages and their UI strings
//! - GET /health - Liveness and model status

pub mod chat;
pub mod meta;
pub mod ocr;
pub mod preview;
pub mod speak;

use axum::extract::Multipart;
use axum::routing::{get, post};
use axum::Router;
use billex_core::RawDocument;

use crate::error::ApiError;
use crate::state::AppState;

/// Create the API router. Trailing-slash variants are accepted for the
/// OCR and chat endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ocr", post(ocr::ocr))
        .route("/ocr/", post(ocr::ocr))
        .route("/chat", post(chat::chat))
        .route("/chat/", post(chat::chat))
        .route("/speak", post(speak::speak))
        .route("/preview", post(preview::preview))
        .route("/languages", get(meta::languages))
        .route("/health", get(meta::health))
}

/// Read the `file` field of a multipart upload into a [`RawDocument`].
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<RawDocument, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        let filename = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());

        tracing::debug!(
            "Received field: name='{}', filename={:?}, content_type={:?}",
            name,
            filename,
            content_type
        );

        if name == "file" {
            let data = field.bytes().await?;
            tracing::debug!("Read {} bytes of file data", data.len());
            return Ok(RawDocument::from_upload(
                data.to_vec(),
                content_type.as_deref(),
                filename,
            )?);
        }
    }

    tracing::warn!("No file field found in multipart upload");
    Err(ApiError::MissingField("file"))
}
