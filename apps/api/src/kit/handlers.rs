//! Axum route handlers for the interview kit API.
//!
//! Each action locks its session for its full duration. A new kit is stored
//! only after generation fully succeeds, and a regenerated question is spliced
//! in only after its call and parse succeed.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::kit::generator::{apply_regeneration, generate_kit};
use crate::kit::models::{InterviewKit, Level, QuestionKind};
use crate::kit::render::{
    build_markdown_export, build_panels, export_filename, scoring_template, KitPanels,
};
use crate::kit::request::{
    GenerateKitRequest, BEHAVIORAL_COUNT_RANGE, DEFAULT_BEHAVIORAL_COUNT,
    DEFAULT_TECHNICAL_COUNT, EXAMPLE_ROLES, TECHNICAL_COUNT_RANGE,
};
use crate::llm_client::Credential;
use crate::session::handlers::lock_session;
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct KitView {
    pub kit: InterviewKit,
    pub panels: KitPanels,
    pub export_filename: String,
}

impl KitView {
    fn new(kit: &InterviewKit) -> Self {
        Self {
            kit: kit.clone(),
            panels: build_panels(kit),
            export_filename: export_filename(kit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

#[derive(Debug, Serialize)]
pub struct KitOptions {
    pub levels: Vec<Level>,
    pub technical_count: CountRange,
    pub behavioral_count: CountRange,
    pub example_roles: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/kit/options
pub async fn handle_kit_options() -> Json<KitOptions> {
    Json(KitOptions {
        levels: Level::ALL.to_vec(),
        technical_count: CountRange {
            min: *TECHNICAL_COUNT_RANGE.start(),
            max: *TECHNICAL_COUNT_RANGE.end(),
            default: DEFAULT_TECHNICAL_COUNT,
        },
        behavioral_count: CountRange {
            min: *BEHAVIORAL_COUNT_RANGE.start(),
            max: *BEHAVIORAL_COUNT_RANGE.end(),
            default: DEFAULT_BEHAVIORAL_COUNT,
        },
        example_roles: EXAMPLE_ROLES,
    })
}

/// POST /api/v1/sessions/:id/kit
///
/// Full generation. Replaces the session's kit wholesale on success; on any
/// failure the previous kit (if any) is left as it was.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GenerateKitRequest>,
) -> Result<Json<KitView>, AppError> {
    let mut session = lock_session(&state, session_id).await?;

    let credential = require_credential(&state, &session)?;
    let request = request.validate()?;

    let port = state.completion.port(Some(credential));
    let kit = generate_kit(port.as_ref(), &request).await?;

    let view = KitView::new(&kit);
    session.replace_kit(kit);
    info!("Stored new kit for session {session_id}");

    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/kit
pub async fn handle_get_kit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<KitView>, AppError> {
    let session = lock_session(&state, session_id).await?;
    let kit = stored_kit(&session)?;
    Ok(Json(KitView::new(kit)))
}

/// POST /api/v1/sessions/:id/kit/:kind/:index/regenerate
///
/// Replaces exactly one question in place; the replacement keeps the old id.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path((session_id, kind, index)): Path<(Uuid, QuestionKind, usize)>,
) -> Result<Json<KitView>, AppError> {
    let mut session = lock_session(&state, session_id).await?;

    let credential = require_credential(&state, &session)?;
    let kit = session
        .kit_mut()
        .ok_or_else(|| AppError::NotFound("No interview kit has been generated yet".to_string()))?;

    let port = state.completion.port(Some(credential));
    apply_regeneration(port.as_ref(), kit, kind, index).await?;

    Ok(Json(KitView::new(kit)))
}

/// GET /api/v1/sessions/:id/kit/export
///
/// Markdown download named after role and level.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = lock_session(&state, session_id).await?;
    let kit = stored_kit(&session)?;

    let disposition = format!("attachment; filename=\"{}\"", export_filename(kit));
    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        build_markdown_export(kit),
    ))
}

/// GET /api/v1/sessions/:id/kit/scoring-template
pub async fn handle_scoring_template(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = lock_session(&state, session_id).await?;
    let kit = stored_kit(&session)?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        scoring_template(kit),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Without a credential the generation actions are disabled outright.
fn require_credential(state: &AppState, session: &Session) -> Result<Credential, AppError> {
    session
        .effective_credential(state.config.anthropic_api_key.as_ref())
        .ok_or_else(|| {
            AppError::Configuration(
                "Anthropic API key is not configured. Set one for this session first."
                    .to_string(),
            )
        })
}

fn stored_kit(session: &Session) -> Result<&InterviewKit, AppError> {
    session
        .kit()
        .ok_or_else(|| AppError::NotFound("No interview kit has been generated yet".to_string()))
}
