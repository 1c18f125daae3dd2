//! Text-generation collaborators and the process-wide model handle.

mod huggingface;

pub use huggingface::HuggingFaceGenerator;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::models::config::GenerationConfig;

/// Reply used whenever no generation model could be initialized.
pub const MODEL_UNAVAILABLE_REPLY: &str = "⚠ The chat model is not available.";

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 150,
            do_sample: true,
            temperature: 0.7,
        }
    }
}

impl From<&GenerationConfig> for GenerationParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_new_tokens: config.max_new_tokens,
            do_sample: config.do_sample,
            temperature: config.temperature,
        }
    }
}

/// A text-generation model: prompt in, completions out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier for logs.
    fn model(&self) -> &str;

    /// Generate completions for `prompt`, best first.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<String>, GenerateError>;
}

/// Outcome of initializing the generation model at start-up.
///
/// Built once and shared read-only. An unavailable model is never retried;
/// chat degrades to [`MODEL_UNAVAILABLE_REPLY`].
#[derive(Clone)]
pub enum ModelHandle {
    Ready(Arc<dyn TextGenerator>),
    Unavailable(String),
}

impl ModelHandle {
    /// Connect to the configured model, recording failure instead of raising it.
    pub async fn initialize(config: &GenerationConfig, token: Option<&str>) -> Self {
        match HuggingFaceGenerator::connect(config, token).await {
            Ok(generator) => {
                info!("Text-generation model {} ready", config.model);
                Self::Ready(Arc::new(generator))
            }
            Err(e) => {
                warn!("Could not load text-generation model {}: {}", config.model, e);
                Self::Unavailable(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Why the model is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(generator) => f.debug_tuple("Ready").field(&generator.model()).finish(),
            Self::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}
