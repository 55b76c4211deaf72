//! Interview kit data model.
//!
//! Deserialized straight from model output, so every field the model might
//! drop is either `Option` or `#[serde(default)]`, and an explicit `null`
//! reads the same as a missing field. Only `question` and `criterion` are
//! required: a kit without them is not well-formed.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Experience level of the role being hired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Junior, Level::MidLevel, Level::Senior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "Junior",
            Level::MidLevel => "Mid-Level",
            Level::Senior => "Senior",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ();

    /// Exact set membership: "senior" or " Senior" are not levels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL.into_iter().find(|l| l.as_str() == s).ok_or(())
    }
}

/// Question difficulty. Parsed leniently: case is ignored and anything
/// unrecognized counts as `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Competency a behavioral question probes. Open-ended: unknown labels are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Competency {
    Communication,
    Ownership,
    Collaboration,
    ConflictResolution,
    Leadership,
    GrowthMindset,
    Other(String),
}

impl Competency {
    pub const KNOWN: [Competency; 6] = [
        Competency::Communication,
        Competency::Ownership,
        Competency::Collaboration,
        Competency::ConflictResolution,
        Competency::Leadership,
        Competency::GrowthMindset,
    ];

    pub fn label(&self) -> &str {
        match self {
            Competency::Communication => "Communication",
            Competency::Ownership => "Ownership",
            Competency::Collaboration => "Collaboration",
            Competency::ConflictResolution => "Conflict Resolution",
            Competency::Leadership => "Leadership",
            Competency::GrowthMindset => "Growth Mindset",
            Competency::Other(label) => label,
        }
    }
}

impl From<String> for Competency {
    fn from(s: String) -> Self {
        Competency::KNOWN
            .into_iter()
            .find(|c| c.label() == s.trim())
            .unwrap_or(Competency::Other(s))
    }
}

impl From<Competency> for String {
    fn from(c: Competency) -> Self {
        c.label().to_string()
    }
}

/// Which of the two question sequences an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Technical,
    Behavioral,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Technical => "technical",
            QuestionKind::Behavioral => "behavioral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    /// 0 means the model left it out; renumbered when the kit is assembled.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u32,
    pub question: String,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expected_topics: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralQuestion {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u32,
    pub question: String,
    #[serde(default)]
    pub competency: Option<Competency>,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// One row of the evaluation rubric. `weight` is a display label ("30%"),
/// never validated as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub criterion: String,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub strong: Option<String>,
    #[serde(default)]
    pub average: Option<String>,
    #[serde(default)]
    pub weak: Option<String>,
    #[serde(default)]
    pub scoring_tip: Option<String>,
}

/// The kit body exactly as the model returns it. Any `role`/`level` echoed
/// by the model are ignored in favour of the validated request.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedKit {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub technical_questions: Vec<TechnicalQuestion>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub behavioral_questions: Vec<BehavioralQuestion>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub evaluation_rubric: Vec<RubricCriterion>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interview_tips: Vec<String>,
}

/// A complete interview kit for one role/level, held in session memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewKit {
    pub role: String,
    pub level: Level,
    /// Skill emphasis used for single-question regeneration. Empty = none.
    pub focus: String,
    pub technical_questions: Vec<TechnicalQuestion>,
    pub behavioral_questions: Vec<BehavioralQuestion>,
    pub evaluation_rubric: Vec<RubricCriterion>,
    pub interview_tips: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// A single regenerated question of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Question {
    Technical(TechnicalQuestion),
    Behavioral(BehavioralQuestion),
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Technical(_) => QuestionKind::Technical,
            Question::Behavioral(_) => QuestionKind::Behavioral,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Question::Technical(q) => q.id,
            Question::Behavioral(q) => q.id,
        }
    }

    fn set_id(&mut self, id: u32) {
        match self {
            Question::Technical(q) => q.id = id,
            Question::Behavioral(q) => q.id = id,
        }
    }
}

impl InterviewKit {
    /// Assembles a kit from model output, enforcing unique question ids.
    pub fn assemble(
        role: String,
        level: Level,
        focus: String,
        generated: GeneratedKit,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut technical_questions = generated.technical_questions;
        let mut behavioral_questions = generated.behavioral_questions;
        renumber_if_needed(technical_questions.iter_mut().map(|q| &mut q.id));
        renumber_if_needed(behavioral_questions.iter_mut().map(|q| &mut q.id));

        Self {
            role,
            level,
            focus,
            technical_questions,
            behavioral_questions,
            evaluation_rubric: generated.evaluation_rubric,
            interview_tips: generated.interview_tips,
            generated_at,
        }
    }

    pub fn question_count(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::Technical => self.technical_questions.len(),
            QuestionKind::Behavioral => self.behavioral_questions.len(),
        }
    }

    /// Text and id of the question at `index`, if it exists.
    pub fn question_at(&self, kind: QuestionKind, index: usize) -> Option<(u32, &str)> {
        match kind {
            QuestionKind::Technical => self
                .technical_questions
                .get(index)
                .map(|q| (q.id, q.question.as_str())),
            QuestionKind::Behavioral => self
                .behavioral_questions
                .get(index)
                .map(|q| (q.id, q.question.as_str())),
        }
    }

    /// Replaces the question at `index` in place, keeping the original id.
    ///
    /// Returns `false` (and changes nothing) when the index is out of range or
    /// the replacement is of the other kind.
    pub fn replace_question(&mut self, index: usize, mut replacement: Question) -> bool {
        let Some((original_id, _)) = self.question_at(replacement.kind(), index) else {
            return false;
        };
        replacement.set_id(original_id);

        match replacement {
            Question::Technical(q) => self.technical_questions[index] = q,
            Question::Behavioral(q) => self.behavioral_questions[index] = q,
        }
        true
    }
}

/// Reads a question id the way models actually write it: `3`, `"3"`, `null`,
/// or a leftover placeholder. Anything that is not a positive `u32` is 0.
fn lenient_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id.unwrap_or(0))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Renumbers `1..=n` when any id is missing (0) or repeated; otherwise
/// keeps the model's ids.
fn renumber_if_needed<'a>(ids: impl Iterator<Item = &'a mut u32>) {
    let mut ids: Vec<&mut u32> = ids.collect();
    let mut seen = HashSet::new();
    let valid = ids.iter().all(|id| **id != 0 && seen.insert(**id));
    if !valid {
        for (i, id) in ids.iter_mut().enumerate() {
            **id = i as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(id: u32, text: &str) -> TechnicalQuestion {
        TechnicalQuestion {
            id,
            question: text.to_string(),
            rationale: None,
            expected_topics: vec![],
            difficulty: None,
        }
    }

    fn kit_with_tech(questions: Vec<TechnicalQuestion>) -> InterviewKit {
        InterviewKit::assemble(
            "Backend Engineer".to_string(),
            Level::Senior,
            String::new(),
            GeneratedKit {
                technical_questions: questions,
                behavioral_questions: vec![],
                evaluation_rubric: vec![],
                interview_tips: vec![],
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_level_serde_uses_display_strings() {
        assert_eq!(
            serde_json::to_string(&Level::MidLevel).unwrap(),
            r#""Mid-Level""#
        );
        let level: Level = serde_json::from_str(r#""Senior""#).unwrap();
        assert_eq!(level, Level::Senior);
    }

    #[test]
    fn test_level_from_str_is_exact_membership() {
        assert_eq!("Junior".parse::<Level>(), Ok(Level::Junior));
        assert_eq!("Mid-Level".parse::<Level>(), Ok(Level::MidLevel));
        assert!("senior".parse::<Level>().is_err());
        assert!("Principal".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn test_difficulty_lenient_parse() {
        let d: Difficulty = serde_json::from_str(r#""hard""#).unwrap();
        assert_eq!(d, Difficulty::Hard);
        let d: Difficulty = serde_json::from_str(r#""Easy|Medium|Hard""#).unwrap();
        assert_eq!(d, Difficulty::Medium);
    }

    #[test]
    fn test_competency_keeps_unknown_label() {
        let c: Competency = serde_json::from_str(r#""Conflict Resolution""#).unwrap();
        assert_eq!(c, Competency::ConflictResolution);
        let c: Competency = serde_json::from_str(r#""Customer Empathy""#).unwrap();
        assert_eq!(c, Competency::Other("Customer Empathy".to_string()));
        assert_eq!(
            serde_json::to_string(&c).unwrap(),
            r#""Customer Empathy""#
        );
    }

    #[test]
    fn test_technical_question_optional_fields_default() {
        let q: TechnicalQuestion =
            serde_json::from_str(r#"{"question": "Explain CAP."}"#).unwrap();
        assert_eq!(q.id, 0);
        assert!(q.rationale.is_none());
        assert!(q.expected_topics.is_empty());
        assert!(q.difficulty.is_none());
    }

    #[test]
    fn test_question_id_accepts_strings_and_junk() {
        let q: TechnicalQuestion =
            serde_json::from_str(r#"{"id": "3", "question": "Explain CAP."}"#).unwrap();
        assert_eq!(q.id, 3);

        for id in [r#"null"#, r#""<keep same id>""#, r#"-2"#, r#"1.5"#, r#"99999999999"#] {
            let body = format!(r#"{{"id": {id}, "question": "Tell me about a conflict."}}"#);
            let q: BehavioralQuestion = serde_json::from_str(&body).unwrap();
            assert_eq!(q.id, 0, "id {id}");
        }
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let q: TechnicalQuestion = serde_json::from_str(
            r#"{"id": 1, "question": "Explain CAP.", "expected_topics": null, "rationale": null}"#,
        )
        .unwrap();
        assert!(q.expected_topics.is_empty());
        assert!(q.rationale.is_none());

        let kit: GeneratedKit = serde_json::from_str(
            r#"{"technical_questions": [], "behavioral_questions": null,
                "evaluation_rubric": null, "interview_tips": null}"#,
        )
        .unwrap();
        assert!(kit.behavioral_questions.is_empty());
        assert!(kit.evaluation_rubric.is_empty());
        assert!(kit.interview_tips.is_empty());
    }

    #[test]
    fn test_question_text_is_required() {
        let result: Result<TechnicalQuestion, _> =
            serde_json::from_str(r#"{"id": 1, "rationale": "why"}"#);
        assert!(result.is_err());
        let result: Result<RubricCriterion, _> = serde_json::from_str(r#"{"weight": "30%"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rubric_weight_is_display_only() {
        let r: RubricCriterion =
            serde_json::from_str(r#"{"criterion": "Depth", "weight": "about a third"}"#).unwrap();
        assert_eq!(r.weight.as_deref(), Some("about a third"));
    }

    #[test]
    fn test_assemble_keeps_unique_ids() {
        let kit = kit_with_tech(vec![tech(7, "a"), tech(3, "b")]);
        let ids: Vec<u32> = kit.technical_questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_assemble_renumbers_duplicates_and_missing() {
        let kit = kit_with_tech(vec![tech(1, "a"), tech(1, "b"), tech(0, "c")]);
        let ids: Vec<u32> = kit.technical_questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_replace_question_keeps_original_id() {
        let mut kit = kit_with_tech(vec![tech(4, "old a"), tech(9, "old b")]);
        let replaced = kit.replace_question(1, Question::Technical(tech(42, "new b")));
        assert!(replaced);
        assert_eq!(kit.technical_questions[1].id, 9);
        assert_eq!(kit.technical_questions[1].question, "new b");
        assert_eq!(kit.technical_questions[0].question, "old a");
    }

    #[test]
    fn test_replace_question_out_of_range_changes_nothing() {
        let mut kit = kit_with_tech(vec![tech(1, "only")]);
        let before = kit.clone();
        assert!(!kit.replace_question(5, Question::Technical(tech(1, "new"))));
        assert_eq!(kit, before);
    }

    #[test]
    fn test_replace_question_wrong_kind_changes_nothing() {
        let mut kit = kit_with_tech(vec![tech(1, "only")]);
        let before = kit.clone();
        let behavioral = BehavioralQuestion {
            id: 1,
            question: "Tell me about a conflict.".to_string(),
            competency: None,
            rationale: None,
        };
        assert!(!kit.replace_question(0, Question::Behavioral(behavioral)));
        assert_eq!(kit, before);
    }
}
