//! Google Translate client (public `translate_a/single` endpoint).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::TranslateError;
use crate::models::config::TranslationConfig;
use crate::models::language::Language;

use super::{split_chunks, Translator};

/// Translator backed by Google's web translate endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    max_chunk_chars: usize,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, max_chunk_chars: usize) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            max_chunk_chars,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(config.endpoint.clone(), config.max_chunk_chars)
    }

    async fn translate_chunk(&self, chunk: &str, target: Language) -> Result<String, TranslateError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslateError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp.json().await?;
        parse_response(&value)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let chunks = split_chunks(text, self.max_chunk_chars);
        debug!("Translating {} chars in {} chunk(s) to {}", text.len(), chunks.len(), target.code());

        let mut translated = String::with_capacity(text.len());
        for chunk in chunks {
            if chunk.trim().is_empty() {
                translated.push_str(chunk);
                continue;
            }
            translated.push_str(&self.translate_chunk(chunk, target).await?);
        }

        info!("Translated {} chars to {}", text.len(), target.code());
        Ok(translated)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists segments as
/// `[translated, original, ...]`.
pub(crate) fn parse_response(value: &Value) -> Result<String, TranslateError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() && !segments.is_empty() {
        return Err(TranslateError::Malformed("segments without text".to_string()));
    }
    Ok(text)
}
