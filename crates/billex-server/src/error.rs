//! API error type and its JSON response.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use billex_core::error::{OcrError, SpeechError, UploadError};
use billex_core::BillexError;
use serde::Serialize;

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request: bad multipart, undecodable image, unreadable text.
    #[error("{0}")]
    BadRequest(String),

    /// A required form or multipart field was absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// The upload is of a kind this endpoint does not handle.
    #[error("{0}")]
    UnsupportedUpload(String),

    /// An external collaborator failed.
    #[error("{service} service failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<&'static str>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedUpload(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::UnsupportedUpload(_) => "UNSUPPORTED_UPLOAD",
            Self::Upstream { .. } => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Upstream { .. } | Self::Internal(_) => tracing::error!("{}", self),
            _ => tracing::debug!("Rejected request: {}", self),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
            service: match &self {
                Self::Upstream { service, .. } => Some(*service),
                _ => None,
            },
        });

        (status, body).into_response()
    }
}

impl From<BillexError> for ApiError {
    fn from(err: BillexError) -> Self {
        if let Some(service) = err.upstream_service() {
            return Self::Upstream {
                service,
                message: err.to_string(),
            };
        }

        match err {
            BillexError::Upload(e) => e.into(),
            BillexError::Image(e) => Self::BadRequest(format!("could not decode image: {}", e)),
            BillexError::Pdf(e) => Self::BadRequest(format!("could not read PDF: {}", e)),
            BillexError::Ocr(OcrError::InvalidImage(reason)) => {
                Self::BadRequest(format!("invalid image: {}", reason))
            }
            BillexError::Speech(SpeechError::EmptyText) => {
                Self::BadRequest("text must not be empty".to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Unsupported(_) => Self::UnsupportedUpload(format!(
                "{}. Upload a PNG or JPEG image of the bill",
                err
            )),
            UploadError::WrongFlow { .. } => Self::UnsupportedUpload(err.to_string()),
            UploadError::InvalidText | UploadError::Empty => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(format!("failed to read upload: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billex_core::error::TranslateError;

    #[test]
    fn test_upstream_mapping() {
        let err = ApiError::from(BillexError::from(TranslateError::Malformed("x".into())));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "UPSTREAM_UNAVAILABLE");
        assert!(matches!(err, ApiError::Upstream { service: "translation", .. }));

        let err = ApiError::from(BillexError::from(SpeechError::Provider {
            status: 503,
            body: "loading".into(),
        }));
        assert!(matches!(err, ApiError::Upstream { service: "speech", .. }));

        let err = ApiError::from(BillexError::from(OcrError::EngineLoad("missing".into())));
        assert!(matches!(err, ApiError::Upstream { service: "ocr", .. }));
    }

    #[test]
    fn test_bad_input_from_collaborators_is_client_error() {
        let err = ApiError::from(BillexError::from(SpeechError::EmptyText));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BAD_REQUEST");

        let err = ApiError::from(BillexError::from(OcrError::InvalidImage("image has no pixels".into())));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("no pixels"));
    }

    #[test]
    fn test_upload_mapping() {
        let err = ApiError::from(BillexError::from(UploadError::WrongFlow { kind: "PDF".into() }));
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.to_string().contains("preview"));

        let err = ApiError::from(UploadError::Unsupported("application/zip".into()));
        assert_eq!(err.code(), "UNSUPPORTED_UPLOAD");
        assert!(err.to_string().contains("PNG or JPEG"));

        let err = ApiError::from(UploadError::Empty);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
