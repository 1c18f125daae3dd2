//! Hugging Face Inference API text-to-speech client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use crate::error::SpeechError;
use crate::models::config::SpeechConfig;
use crate::models::language::Language;

use super::{SpeechSynthesizer, SynthesizedAudio};

/// One voice model per language; English falls back to a generic voice.
pub struct HuggingFaceSpeech {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HuggingFaceSpeech {
    pub fn new(endpoint: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &SpeechConfig, token: Option<String>) -> Self {
        Self::new(&config.endpoint, token)
    }

    /// Model endpoint for the voice of `language`.
    pub fn voice_url(&self, language: Language) -> String {
        format!("{}/models/{}", self.endpoint, language.tts_model())
    }
}

#[async_trait]
impl SpeechSynthesizer for HuggingFaceSpeech {
    async fn synthesize(&self, text: &str, language: Language) -> Result<SynthesizedAudio, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!("Synthesizing {} chars with {}", text.len(), language.tts_model());

        let mut request = self
            .client
            .post(self.voice_url(language))
            .json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/wav")
            .to_string();
        let bytes = resp.bytes().await?;

        info!("Synthesized {} bytes of {}", bytes.len(), content_type);
        Ok(SynthesizedAudio { bytes, content_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_url() {
        let speech = HuggingFaceSpeech::new("https://api-inference.huggingface.co", None);
        assert_eq!(
            speech.voice_url(Language::Hindi),
            "https://api-inference.huggingface.co/models/ai4bharat/indic-tts-hi"
        );
        assert_eq!(
            speech.voice_url(Language::English),
            "https://api-inference.huggingface.co/models/facebook/mms-tts-eng"
        );
    }

    #[tokio::test]
    async fn test_empty_text() {
        let speech = HuggingFaceSpeech::new("http://127.0.0.1:9", None);
        let err = speech.synthesize("   ", Language::Telugu).await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyText));
    }
}
