//! HTTP service for the bill explainer.

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router with tracing and the upload size limit.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config().server.max_upload_bytes;

    routes::router()
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
