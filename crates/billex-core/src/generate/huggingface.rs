//! Hugging Face Inference API text-generation client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerateError;
use crate::models::config::GenerationConfig;

use super::{GenerationParams, TextGenerator};

/// Text generation through `POST {endpoint}/models/{model}`.
pub struct HuggingFaceGenerator {
    client: Client,
    endpoint: String,
    model: String,
    token: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    do_sample: bool,
    temperature: f32,
}

#[derive(Deserialize)]
struct Generated {
    generated_text: String,
}

impl HuggingFaceGenerator {
    pub fn new(endpoint: &str, model: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            token: token.to_string(),
        }
    }

    /// Build the client and check the model answers before serving requests.
    pub async fn connect(config: &GenerationConfig, token: Option<&str>) -> Result<Self, GenerateError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(GenerateError::MissingToken)?;
        let generator = Self::new(&config.endpoint, &config.model, token);

        let resp = generator
            .client
            .get(format!("{}/status/{}", generator.endpoint, generator.model))
            .bearer_auth(&generator.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(generator)
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<String>, GenerateError> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: Parameters {
                max_new_tokens: params.max_new_tokens,
                do_sample: params.do_sample,
                temperature: params.temperature,
            },
        };

        debug!("Generating with {} (max_new_tokens={})", self.model, params.max_new_tokens);

        let resp = self
            .client
            .post(self.url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerateError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let generated: Vec<Generated> = resp.json().await?;
        if generated.is_empty() {
            return Err(GenerateError::Empty);
        }
        Ok(generated.into_iter().map(|g| g.generated_text).collect())
    }
}
