//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;

use super::OcrProvider;

/// OCR engine backed by `pure-onnx-ocr` (no external binary, Latin script only).
pub struct PureOcrEngine {
    engine: Arc<Mutex<pure_onnx_ocr::engine::OcrEngine>>,
    keep_unk: bool,
}

/// A recognized line with the top-left corner of its box.
struct Line {
    x: f32,
    y: f32,
    text: String,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path, keep_unk: bool) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::EngineLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::EngineLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            keep_unk,
        })
    }

    fn run(
        engine: &Mutex<pure_onnx_ocr::engine::OcrEngine>,
        image: &DynamicImage,
        keep_unk: bool,
    ) -> Result<String, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        let engine = engine
            .lock()
            .map_err(|_| OcrError::Recognition("OCR engine lock poisoned".to_string()))?;
        let results = engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions for {}x{}", results.len(), width, height);

        let mut lines: Vec<Line> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                let text = if keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                Line { x, y, text }
            })
            .collect();

        // Reading order: rows of ~20px, then left to right.
        lines.sort_by(|a, b| {
            let row_a = (a.y / 20.0) as i32;
            let row_b = (b.y / 20.0) as i32;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR complete: {} lines in {}ms",
            lines.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

#[async_trait]
impl OcrProvider for PureOcrEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    async fn recognize(&self, image: &DynamicImage, languages: &str) -> Result<String, OcrError> {
        debug!("pure-onnx-ocr ignores language hint {}", languages);

        let engine = Arc::clone(&self.engine);
        let image = image.clone();
        let keep_unk = self.keep_unk;

        tokio::task::spawn_blocking(move || Self::run(&engine, &image, keep_unk))
            .await
            .map_err(|e| OcrError::Recognition(format!("OCR task failed: {}", e)))?
    }
}

/// Smallest x and y over the first four exterior points.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .take(4)
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}
