//! Configuration structures for the bill explainer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::language::Language;

/// Environment variable holding the model-hosting access token.
pub const ENV_HF_TOKEN: &str = "HF_TOKEN";
/// Environment variable overriding the OCR language hint.
pub const ENV_OCR_LANGUAGES: &str = "BILLEX_OCR_LANGUAGES";
/// Environment variable overriding the Tesseract binary path.
pub const ENV_TESSERACT_CMD: &str = "BILLEX_TESSERACT_CMD";
/// Environment variable overriding the target language.
pub const ENV_TARGET_LANGUAGE: &str = "BILLEX_TARGET_LANGUAGE";
/// Environment variable overriding the text-generation model.
pub const ENV_GENERATION_MODEL: &str = "BILLEX_GENERATION_MODEL";
/// Environment variable overriding the server bind address.
pub const ENV_BIND: &str = "BILLEX_BIND";

/// Default OCR hint: English and Telugu.
pub const DEFAULT_OCR_LANGUAGES: &str = "eng+tel";

/// Main configuration for the billex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BillexConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Translation configuration.
    pub translation: TranslationConfig,

    /// Text-generation configuration.
    pub generation: GenerationConfig,

    /// Text-to-speech configuration.
    pub speech: SpeechConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Access token for the model-hosting service. Never serialized.
    #[serde(skip)]
    pub hf_token: Option<String>,
}

/// Which OCR engine to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    /// External `tesseract` binary.
    #[default]
    Tesseract,
    /// Pure Rust ONNX models (`pure-onnx-ocr`).
    Onnx,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub backend: OcrBackend,

    /// Tesseract-style language hint, English plus one regional script.
    /// Independent of the translation target.
    pub languages: String,

    /// Path to the Tesseract binary; `tesseract` on PATH when unset.
    pub tesseract_cmd: Option<PathBuf>,

    /// Directory holding `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: PathBuf,

    /// Keep `[UNK]` tokens from the ONNX recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Tesseract,
            languages: DEFAULT_OCR_LANGUAGES.to_string(),
            tesseract_cmd: None,
            model_dir: PathBuf::from("models"),
            keep_unk: false,
        }
    }
}

/// Translation provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Base URL of the translate endpoint.
    pub endpoint: String,

    /// Language bills are translated into; also picks the OCR script hint.
    pub target_language: Language,

    /// Largest text sent in one provider call.
    pub max_chunk_chars: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            target_language: Language::Telugu,
            max_chunk_chars: 5000,
        }
    }
}

/// Text-generation model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Inference API base URL.
    pub endpoint: String,

    /// Model id; the smaller model answers faster.
    pub model: String,

    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co".to_string(),
            model: "ibm-granite/granite-350M".to_string(),
            max_new_tokens: 150,
            do_sample: true,
            temperature: 0.7,
        }
    }
}

/// Text-to-speech configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Inference API base URL.
    pub endpoint: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,

    /// Largest accepted request body.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl BillexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file. The access token is not written.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<(), crate::BillexError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), crate::BillexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_HF_TOKEN) {
            self.hf_token = Some(token);
        }
        if let Some(languages) = get(ENV_OCR_LANGUAGES) {
            self.ocr.languages = languages;
        }
        if let Some(cmd) = get(ENV_TESSERACT_CMD) {
            self.ocr.tesseract_cmd = Some(PathBuf::from(cmd));
        }
        if let Some(lang) = get(ENV_TARGET_LANGUAGE) {
            self.translation.target_language = lang
                .parse()
                .map_err(|e: super::language::UnknownLanguage| crate::BillexError::Config(e.to_string()))?;
        }
        if let Some(model) = get(ENV_GENERATION_MODEL) {
            self.generation.model = model;
        }
        if let Some(bind) = get(ENV_BIND) {
            self.server.bind = bind;
        }
        Ok(())
    }
}
