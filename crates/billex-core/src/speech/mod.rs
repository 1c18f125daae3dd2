//! Text-to-speech collaborators.

mod huggingface;

pub use huggingface::HuggingFaceSpeech;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SpeechError;
use crate::models::language::Language;

/// Raw audio returned by a synthesizer.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub bytes: Bytes,
    /// MIME type as reported by the provider, e.g. `audio/flac`.
    pub content_type: String,
}

/// Speaks text with the voice for a language.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<SynthesizedAudio, SpeechError>;
}
