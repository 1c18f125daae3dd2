//! Application state management

use std::sync::Arc;

use billex_core::generate::GenerationParams;
use billex_core::speech::HuggingFaceSpeech;
use billex_core::{
    BillexConfig, ChatService, Language, ModelHandle, RequestOrchestrator, SpeechService,
};

/// Shared application state
///
/// Everything in here is built once at start-up and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BillexConfig,
    orchestrator: RequestOrchestrator,
    chat: ChatService,
    speech: SpeechService,
}

impl AppState {
    /// Assemble state from already-built services.
    pub fn new(
        config: BillexConfig,
        orchestrator: RequestOrchestrator,
        chat: ChatService,
        speech: SpeechService,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                orchestrator,
                chat,
                speech,
            }),
        }
    }

    /// Build the real collaborators from configuration.
    ///
    /// The generation model is initialized exactly once here. If it cannot be
    /// reached the server still starts and chat answers in-band.
    pub async fn from_config(config: BillexConfig) -> billex_core::Result<Self> {
        let orchestrator = RequestOrchestrator::from_config(&config)?;

        let model = ModelHandle::initialize(&config.generation, config.hf_token.as_deref()).await;
        let chat = ChatService::new(model, GenerationParams::from(&config.generation));

        let speech = SpeechService::new(Arc::new(HuggingFaceSpeech::from_config(
            &config.speech,
            config.hf_token.clone(),
        )));

        Ok(Self::new(config, orchestrator, chat, speech))
    }

    /// Get the configuration
    pub fn config(&self) -> &BillexConfig {
        &self.inner.config
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator {
        &self.inner.orchestrator
    }

    pub fn chat(&self) -> &ChatService {
        &self.inner.chat
    }

    pub fn speech(&self) -> &SpeechService {
        &self.inner.speech
    }

    /// Language used when a request does not name one.
    pub fn default_language(&self) -> Language {
        self.inner.orchestrator.target_language()
    }
}
