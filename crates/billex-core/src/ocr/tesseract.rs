//! OCR through an external Tesseract binary.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView, ImageFormat};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::OcrProvider;

/// Runs `tesseract <image> stdout -l <languages>`.
pub struct TesseractOcr {
    command: PathBuf,
}

impl TesseractOcr {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Use the configured binary, or `tesseract` from PATH.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(
            config
                .tesseract_cmd
                .clone()
                .unwrap_or_else(|| PathBuf::from("tesseract")),
        )
    }

    pub fn command(&self) -> &std::path::Path {
        &self.command
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
    Ok(png)
}

#[async_trait]
impl OcrProvider for TesseractOcr {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage("image has no pixels".to_string()));
        }

        let owned = image.clone();
        let png = tokio::task::spawn_blocking(move || encode_png(&owned))
            .await
            .map_err(|e| OcrError::Recognition(format!("encoder task failed: {}", e)))??;

        // Removed on drop.
        let input = tempfile::Builder::new()
            .prefix("billex_ocr_")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Recognition(format!("failed to create temp file: {}", e)))?;
        tokio::fs::write(input.path(), &png)
            .await
            .map_err(|e| OcrError::Recognition(format!("failed to write temp file: {}", e)))?;

        debug!(
            "Running {} on {}x{} image with languages {}",
            self.command.display(),
            width,
            height,
            languages
        );

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(languages)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => OcrError::EngineLoad(format!(
                    "tesseract binary not found at {}",
                    self.command.display()
                )),
                _ => OcrError::Recognition(format!("failed to run tesseract: {}", e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();

        info!(
            "OCR complete: {} chars in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let ocr = TesseractOcr::from_config(&OcrConfig::default());
        assert_eq!(ocr.command(), std::path::Path::new("tesseract"));
    }

    #[test]
    fn test_encode_png() {
        let png = encode_png(&DynamicImage::new_rgb8(3, 2)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_missing_binary_is_engine_load_error() {
        let ocr = TesseractOcr::new("/nonexistent/billex/tesseract");
        let image = DynamicImage::new_rgb8(4, 4);

        let err = ocr.recognize(&image, "eng+tel").await.unwrap_err();
        assert!(matches!(err, OcrError::EngineLoad(_)));
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let ocr = TesseractOcr::new("tesseract");
        let image = DynamicImage::new_rgb8(0, 0);

        let err = ocr.recognize(&image, "eng").await.unwrap_err();
        assert!(matches!(err, OcrError::InvalidImage(_)));
    }
}
