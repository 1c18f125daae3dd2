//! Bill explainer server
//!
//! Serves the OCR, chat, speech and preview endpoints over HTTP.

use std::path::PathBuf;

use anyhow::Context;
use billex_core::BillexConfig;
use billex_server::{build_router, AppState};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Optional path to a JSON config file.
const ENV_CONFIG: &str = "BILLEX_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billex_server=debug,billex_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;

    tracing::info!("Starting billex server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("OCR backend: {:?}", config.ocr.backend);
    tracing::info!("Target language: {}", config.translation.target_language);
    tracing::info!("Generation model: {}", config.generation.model);
    if config.hf_token.is_none() {
        tracing::warn!("HF_TOKEN is not set; chat and speech will be limited");
    }

    let bind = config.server.bind.clone();
    let state = AppState::from_config(config)
        .await
        .context("Failed to initialize services")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    tracing::info!("billex server listening on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Config file (if `BILLEX_CONFIG` names one), then environment overrides.
fn load_config() -> anyhow::Result<BillexConfig> {
    let mut config = match std::env::var(ENV_CONFIG).ok().map(PathBuf::from) {
        Some(path) => BillexConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BillexConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
