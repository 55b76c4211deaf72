//! Prompt Builder — pure functions from validated parameters to prompt text.
//!
//! Deterministic: the same inputs always produce byte-identical prompts.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::kit::models::{Level, QuestionKind};
use crate::kit::prompts::{
    BEHAVIORAL_QUESTION_SHAPE, INTERVIEWER_PERSONA, INTERVIEWER_RULES, JUNIOR_GUIDANCE,
    KIT_PROMPT_TEMPLATE, MID_LEVEL_GUIDANCE, REGEN_PROMPT_TEMPLATE, SENIOR_GUIDANCE,
    TECHNICAL_QUESTION_SHAPE,
};
use crate::kit::request::KitRequest;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Output bound for a full kit.
pub const KIT_MAX_TOKENS: u32 = 4096;
/// Output bound for one regenerated question.
pub const REGEN_MAX_TOKENS: u32 = 512;

/// `{name}` placeholder in a prompt template.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Fills every placeholder in a single pass over `template`. Substituted text
/// is never rescanned, so braces in user input come through literally.
/// Unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

/// System instruction shared by kit and regeneration calls.
pub fn build_system_prompt() -> String {
    format!("{INTERVIEWER_PERSONA}\n{JSON_ONLY_SYSTEM}\n{INTERVIEWER_RULES}")
}

/// Calibration guidance for each experience level.
pub fn level_guidance(level: Level) -> &'static str {
    match level {
        Level::Junior => JUNIOR_GUIDANCE,
        Level::MidLevel => MID_LEVEL_GUIDANCE,
        Level::Senior => SENIOR_GUIDANCE,
    }
}

/// Builds the full-kit prompt.
pub fn build_generation_prompt(request: &KitRequest) -> String {
    let focus_line = if request.focus().trim().is_empty() {
        "None — cover the most important areas broadly.".to_string()
    } else {
        format!("{} (give this area a special focus).", request.focus())
    };

    fill_template(
        KIT_PROMPT_TEMPLATE,
        &[
            ("role", request.role()),
            ("level", request.level().as_str()),
            ("focus_line", &focus_line),
            ("guidance", level_guidance(request.level())),
            ("n_tech", &request.technical_count().to_string()),
            ("n_beh", &request.behavioral_count().to_string()),
        ],
    )
}

/// Builds the prompt that replaces one question. Only the target shape for
/// `kind` is included.
pub fn build_regen_prompt(
    role: &str,
    level: Level,
    kind: QuestionKind,
    old_question: &str,
    focus: &str,
) -> String {
    let focus = if focus.trim().is_empty() { "None" } else { focus };
    let shape = match kind {
        QuestionKind::Technical => TECHNICAL_QUESTION_SHAPE,
        QuestionKind::Behavioral => BEHAVIORAL_QUESTION_SHAPE,
    };

    fill_template(
        REGEN_PROMPT_TEMPLATE,
        &[
            ("kind", kind.as_str()),
            ("role", role),
            ("level", level.as_str()),
            ("focus", focus),
            ("old_question", old_question),
            ("shape", shape),
        ],
    )
}
