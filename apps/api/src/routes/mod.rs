pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::kit::handlers as kit;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/kit/options", get(kit::handle_kit_options))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/credential",
            put(session::handle_set_credential),
        )
        // Kit
        .route(
            "/api/v1/sessions/:id/kit",
            get(kit::handle_get_kit).post(kit::handle_generate),
        )
        .route("/api/v1/sessions/:id/kit/export", get(kit::handle_export))
        .route(
            "/api/v1/sessions/:id/kit/scoring-template",
            get(kit::handle_scoring_template),
        )
        .route(
            "/api/v1/sessions/:id/kit/:kind/:index/regenerate",
            post(kit::handle_regenerate),
        )
        .with_state(state)
}
