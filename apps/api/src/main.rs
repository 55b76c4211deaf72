mod config;
mod errors;
mod kit;
mod llm_client;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{build_http_client, AnthropicProvider};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Kit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion provider (one pooled HTTP client, one LlmClient per credential)
    let http = build_http_client()?;
    let completion = Arc::new(AnthropicProvider::new(http, config.anthropic_api_url.clone()));
    info!("Completion provider initialized (model: {})", llm_client::MODEL);

    if config.anthropic_api_key.is_none() {
        warn!("ANTHROPIC_API_KEY not set; sessions must supply their own key before generating");
    }

    let sessions = SessionStore::default();
    sessions.spawn_idle_cleanup(config.session_idle_minutes);
    info!("Sessions expire after {} idle minutes", config.session_idle_minutes);

    let state = AppState {
        config: config.clone(),
        sessions,
        completion,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser front end is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
