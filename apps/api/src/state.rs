use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionProvider;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Builds a completion client per credential. Default: AnthropicProvider.
    pub completion: Arc<dyn CompletionProvider>,
}
