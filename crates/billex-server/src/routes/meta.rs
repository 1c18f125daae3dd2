//! Language list and health check.

use axum::extract::State;
use axum::Json;
use billex_core::{Language, UiStrings};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub ui: UiStrings,
}

#[derive(Serialize)]
pub struct LanguagesResponse {
    pub default: &'static str,
    pub languages: Vec<LanguageInfo>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub chat_model: bool,
}

pub async fn languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        default: state.default_language().code(),
        languages: Language::ALL
            .iter()
            .map(|&lang| LanguageInfo {
                code: lang.code(),
                name: lang.display_name(),
                ui: lang.ui_strings(),
            })
            .collect(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        chat_model: state.chat().model().is_ready(),
    })
}
