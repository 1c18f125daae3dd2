//! OCR collaborators.
//!
//! The OCR engine is treated as a black box: an image goes in, one text blob
//! comes out. Two backends are available:
//! - [`TesseractOcr`] drives an external `tesseract` binary
//! - [`PureOcrEngine`] runs ONNX models in-process (`native` feature)

#[cfg(feature = "native")]
mod pure_engine;
mod tesseract;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;
pub use tesseract::TesseractOcr;

use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use tracing::info;

use crate::error::OcrError;
use crate::models::config::{OcrBackend, OcrConfig};

/// Anything that can turn an image into text.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Short engine identifier for logs.
    fn name(&self) -> &'static str;

    /// Recognize text in `image`. `languages` is a Tesseract-style hint such
    /// as `eng+tel`; engines without language packs may ignore it.
    async fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String, OcrError>;
}

/// Build the configured OCR provider.
pub fn create_provider(config: &OcrConfig) -> Result<Arc<dyn OcrProvider>, OcrError> {
    let provider: Arc<dyn OcrProvider> = match config.backend {
        OcrBackend::Tesseract => Arc::new(TesseractOcr::from_config(config)),
        #[cfg(feature = "native")]
        OcrBackend::Onnx => Arc::new(PureOcrEngine::from_dir(&config.model_dir, config.keep_unk)?),
        #[cfg(not(feature = "native"))]
        OcrBackend::Onnx => {
            return Err(OcrError::EngineLoad(
                "ONNX backend requires the `native` feature".to_string(),
            ))
        }
    };

    info!("Using OCR provider: {}", provider.name());
    Ok(provider)
}
