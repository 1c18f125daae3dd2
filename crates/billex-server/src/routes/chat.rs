//! Chat endpoint.

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

pub async fn chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Json<ChatReply>, ApiError> {
    let query = form.query.ok_or(ApiError::MissingField("query"))?;
    tracing::debug!("Chat query of {} chars", query.len());
    let reply = state.chat().reply(&query).await?;
    Ok(Json(ChatReply { reply }))
}
