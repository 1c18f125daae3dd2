//! Core library for the utility-bill explainer.
//!
//! This crate provides:
//! - Bill field extraction (amount due, due date) from OCR text
//! - OCR providers (Tesseract binary, pure Rust ONNX models)
//! - PDF and plain-text preview for non-image uploads
//! - Translation, text-generation and text-to-speech collaborators
//! - The request orchestrator tying them together

pub mod error;
pub mod extract;
pub mod generate;
pub mod models;
pub mod ocr;
pub mod orchestrator;
pub mod pdf;
pub mod speech;
pub mod translate;
pub mod upload;

pub use error::{BillexError, Result};
pub use extract::{BillFieldExtractor, FieldExtractor};
pub use generate::{GenerationParams, ModelHandle, TextGenerator, MODEL_UNAVAILABLE_REPLY};
pub use models::bill::{BillRecord, TranslatedBillRecord, DOCUMENT_TYPE, NOT_FOUND};
pub use models::chat::{ChatRole, ChatTranscript, ChatTurn};
pub use models::config::BillexConfig;
pub use models::language::{Language, UiStrings};
pub use ocr::OcrProvider;
pub use orchestrator::{ChatService, OcrResponse, RequestOrchestrator, SpeechService};
pub use pdf::{PdfExtractor, PdfPreview, PdfType};
pub use speech::{SpeechSynthesizer, SynthesizedAudio};
pub use translate::Translator;
pub use upload::{MediaKind, Preview, RawDocument};
