use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use ballpark_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::chat::{ChatBackend, OpenAiChatClient};
use crate::{chat, health, quote};

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let chat_backend =
        Arc::new(OpenAiChatClient::from_config(&config.chat).map_err(BootstrapError::HttpClient)?);

    info!(
        event_name = "system.bootstrap.chat_backend_ready",
        correlation_id = "bootstrap",
        api_key_configured = config.chat.api_key.is_some(),
        model = %config.chat.model,
        "chat backend initialized"
    );

    let router = app_router(chat_backend);
    Ok(Application { config, router })
}

/// Assemble the full route table with the CORS policy the site embeds expect:
/// any origin, `Content-Type`, `POST`/`OPTIONS`.
pub fn app_router(chat_backend: Arc<dyn ChatBackend>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::OPTIONS]);

    Router::new()
        .merge(quote::router())
        .merge(chat::router(chat_backend))
        .merge(health::router())
        .layer(cors)
}
