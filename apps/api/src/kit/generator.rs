//! Kit generation — orchestrates builder → completion port → parser.
//!
//! Flow (full kit): build prompt → complete (4096) → extract JSON →
//!                  assemble kit with normalized role/level/focus.
//! Flow (one question): build regen prompt → complete (512) → extract JSON →
//!                      force original id → replace in place.
//!
//! Nothing here stores anything. Callers commit the returned kit only on `Ok`,
//! which is what keeps a failed action from touching session state.

use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::kit::builder::{
    build_generation_prompt, build_regen_prompt, build_system_prompt, KIT_MAX_TOKENS,
    REGEN_MAX_TOKENS,
};
use crate::kit::models::{
    BehavioralQuestion, GeneratedKit, InterviewKit, Question, QuestionKind, TechnicalQuestion,
};
use crate::kit::request::KitRequest;
use crate::llm_client::extract::extract_json;
use crate::llm_client::CompletionPort;

/// Generates a complete kit. The returned kit is new; no existing kit is read.
pub async fn generate_kit(
    port: &dyn CompletionPort,
    request: &KitRequest,
) -> Result<InterviewKit, AppError> {
    info!(
        "Generating interview kit: role={}, level={}, technical={}, behavioral={}",
        request.role(),
        request.level(),
        request.technical_count(),
        request.behavioral_count()
    );

    let prompt = build_generation_prompt(request);
    let raw = port
        .complete(&build_system_prompt(), &prompt, KIT_MAX_TOKENS)
        .await?;

    let generated: GeneratedKit = extract_json(&raw)?;

    if generated.technical_questions.len() != request.technical_count() as usize
        || generated.behavioral_questions.len() != request.behavioral_count() as usize
    {
        warn!(
            "Model returned {} technical / {} behavioral questions (asked for {} / {})",
            generated.technical_questions.len(),
            generated.behavioral_questions.len(),
            request.technical_count(),
            request.behavioral_count()
        );
    }

    let kit = InterviewKit::assemble(
        request.role().to_string(),
        request.level(),
        request.focus().to_string(),
        generated,
        Utc::now(),
    );

    info!(
        "Generated interview kit for {} ({}): {} technical, {} behavioral, {} rubric criteria",
        kit.role,
        kit.level,
        kit.technical_questions.len(),
        kit.behavioral_questions.len(),
        kit.evaluation_rubric.len()
    );

    Ok(kit)
}

/// Produces a replacement for the question at `index` without modifying the kit.
/// The replacement already carries the original question's id.
pub async fn regenerate_question(
    port: &dyn CompletionPort,
    kit: &InterviewKit,
    kind: QuestionKind,
    index: usize,
) -> Result<Question, AppError> {
    let (original_id, old_text) = kit.question_at(kind, index).ok_or_else(|| {
        AppError::NotFound(format!(
            "No {} question at index {index} (kit has {})",
            kind.as_str(),
            kit.question_count(kind)
        ))
    })?;

    info!(
        "Regenerating {} question {} (id={}) for {} ({})",
        kind.as_str(),
        index,
        original_id,
        kit.role,
        kit.level
    );

    let prompt = build_regen_prompt(&kit.role, kit.level, kind, old_text, &kit.focus);
    let raw = port
        .complete(&build_system_prompt(), &prompt, REGEN_MAX_TOKENS)
        .await?;

    let question = match kind {
        QuestionKind::Technical => {
            let mut q: TechnicalQuestion = extract_json(&raw)?;
            q.id = original_id;
            Question::Technical(q)
        }
        QuestionKind::Behavioral => {
            let mut q: BehavioralQuestion = extract_json(&raw)?;
            q.id = original_id;
            Question::Behavioral(q)
        }
    };

    Ok(question)
}

/// Regenerates one question and splices it into `kit`. All-or-nothing: on
/// any error the kit is exactly as it was.
pub async fn apply_regeneration(
    port: &dyn CompletionPort,
    kit: &mut InterviewKit,
    kind: QuestionKind,
    index: usize,
) -> Result<Question, AppError> {
    let question = regenerate_question(port, kit, kind, index).await?;

    if !kit.replace_question(index, question.clone()) {
        return Err(AppError::Internal(anyhow::anyhow!(
            "{} question {index} vanished during regeneration",
            kind.as_str()
        )));
    }

    info!(
        "Replaced {} question {} (id={})",
        kind.as_str(),
        index,
        question.id()
    );

    Ok(question)
}
