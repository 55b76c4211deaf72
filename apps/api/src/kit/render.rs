//! Kit rendering — display panels for the front end and the markdown export.
//!
//! Pure formatting. Missing optional fields render as `PLACEHOLDER`; rendering
//! never fails on a partially populated kit.

use serde::Serialize;

use crate::kit::models::{
    BehavioralQuestion, Competency, Difficulty, InterviewKit, Level, RubricCriterion,
    TechnicalQuestion,
};

pub const PLACEHOLDER: &str = "—";
const TITLE_MAX_CHARS: usize = 90;
const DEFAULT_COMPETENCY_LABEL: &str = "General";
const DEFAULT_COMPETENCY_COLOR: &str = "#94a3b8";

/// General interviewing practices shown under the tips panel.
pub const BEST_PRACTICES: &[(&str, &str)] = &[
    ("🕐", "Allow 45–60 seconds of silence after each question — candidates need thinking time."),
    ("📝", "Take sparse but focused notes — capture key phrases, not full sentences."),
    ("🔄", "Use the same questions in the same order across all candidates for fairness."),
    ("🚫", "Avoid leading questions like 'Do you agree that X is better?' — keep them open-ended."),
    ("🌱", "For juniors, probe for learning ability, not just current knowledge."),
    ("🏗️", "For seniors, always ask about decisions they'd make *differently* in hindsight."),
];

// ────────────────────────────────────────────────────────────────────────────
// Panels
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct KitPanels {
    pub stats: StatsPanel,
    pub technical: Panel<TechnicalCard>,
    pub behavioral: Panel<BehavioralCard>,
    pub rubric: Panel<RubricCard>,
    pub scoring_template: String,
    pub tips: Panel<TipCard>,
    pub best_practices: Vec<TipCard>,
}

/// A titled group of cards. `notice` is set when the group is empty.
#[derive(Debug, Clone, Serialize)]
pub struct Panel<T> {
    pub title: &'static str,
    pub items: Vec<T>,
    pub notice: Option<&'static str>,
}

impl<T> Panel<T> {
    fn new(title: &'static str, items: Vec<T>, empty_notice: &'static str) -> Self {
        let notice = items.is_empty().then_some(empty_notice);
        Self {
            title,
            items,
            notice,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsPanel {
    pub role: String,
    pub level: Level,
    pub level_badge: &'static str,
    pub technical_count: usize,
    pub behavioral_count: usize,
    pub rubric_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalCard {
    pub number: usize,
    pub id: u32,
    pub title: String,
    pub question: String,
    pub difficulty: &'static str,
    pub badge: &'static str,
    pub rationale: String,
    pub topics: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BehavioralCard {
    pub number: usize,
    pub id: u32,
    pub title: String,
    pub question: String,
    pub competency: String,
    pub color: &'static str,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RubricCard {
    pub criterion: String,
    pub weight: String,
    pub strong: String,
    pub average: String,
    pub weak: String,
    pub scoring_tip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TipCard {
    pub icon: &'static str,
    pub text: String,
}

pub fn build_panels(kit: &InterviewKit) -> KitPanels {
    let technical = kit
        .technical_questions
        .iter()
        .enumerate()
        .map(|(i, q)| technical_card(i + 1, q))
        .collect();
    let behavioral = kit
        .behavioral_questions
        .iter()
        .enumerate()
        .map(|(i, q)| behavioral_card(i + 1, q))
        .collect();
    let rubric = kit.evaluation_rubric.iter().map(rubric_card).collect();
    let tips = kit
        .interview_tips
        .iter()
        .enumerate()
        .map(|(i, tip)| TipCard {
            icon: tip_icon(i + 1),
            text: tip.clone(),
        })
        .collect();

    KitPanels {
        stats: StatsPanel {
            role: kit.role.clone(),
            level: kit.level,
            level_badge: level_badge(kit.level),
            technical_count: kit.technical_questions.len(),
            behavioral_count: kit.behavioral_questions.len(),
            rubric_count: kit.evaluation_rubric.len(),
        },
        technical: Panel::new(
            "🔧 Technical Questions",
            technical,
            "No technical questions found. Try regenerating.",
        ),
        behavioral: Panel::new(
            "💬 Behavioral Questions",
            behavioral,
            "No behavioral questions found. Try regenerating.",
        ),
        rubric: Panel::new(
            "📊 Evaluation Rubric",
            rubric,
            "No rubric found. Try regenerating.",
        ),
        scoring_template: scoring_template(kit),
        tips: Panel::new(
            "💡 Interviewer Tips",
            tips,
            "No tips generated for this kit.",
        ),
        best_practices: BEST_PRACTICES
            .iter()
            .map(|&(icon, text)| TipCard {
                icon,
                text: text.to_string(),
            })
            .collect(),
    }
}

fn technical_card(number: usize, q: &TechnicalQuestion) -> TechnicalCard {
    // Panels show an unrated question as Medium; the export shows the placeholder.
    let difficulty = q.difficulty.unwrap_or(Difficulty::Medium);
    TechnicalCard {
        number,
        id: q.id,
        title: card_title(number, &q.question),
        question: q.question.clone(),
        difficulty: difficulty.as_str(),
        badge: difficulty_badge(difficulty),
        rationale: or_placeholder(q.rationale.as_deref()),
        topics: (!q.expected_topics.is_empty()).then(|| q.expected_topics.join(" · ")),
    }
}

fn behavioral_card(number: usize, q: &BehavioralQuestion) -> BehavioralCard {
    BehavioralCard {
        number,
        id: q.id,
        title: card_title(number, &q.question),
        question: q.question.clone(),
        competency: q
            .competency
            .as_ref()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| DEFAULT_COMPETENCY_LABEL.to_string()),
        color: competency_color(q.competency.as_ref()),
        rationale: or_placeholder(q.rationale.as_deref()),
    }
}

fn rubric_card(r: &RubricCriterion) -> RubricCard {
    RubricCard {
        criterion: r.criterion.clone(),
        weight: or_placeholder(r.weight.as_deref()),
        strong: or_placeholder(r.strong.as_deref()),
        average: or_placeholder(r.average.as_deref()),
        weak: or_placeholder(r.weak.as_deref()),
        scoring_tip: or_placeholder(r.scoring_tip.as_deref()),
    }
}

/// "Q3. <question>" cut to 90 characters with an ellipsis.
fn card_title(number: usize, question: &str) -> String {
    let mut title: String = question.chars().take(TITLE_MAX_CHARS).collect();
    if question.chars().count() > TITLE_MAX_CHARS {
        title.push('…');
    }
    format!("Q{number}. {title}")
}

fn level_badge(level: Level) -> &'static str {
    match level {
        Level::Junior => "badge-junior",
        Level::MidLevel => "badge-mid",
        Level::Senior => "badge-senior",
    }
}

fn difficulty_badge(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "badge-junior",
        Difficulty::Medium => "badge-mid",
        Difficulty::Hard => "badge-senior",
    }
}

fn competency_color(competency: Option<&Competency>) -> &'static str {
    match competency {
        Some(Competency::Communication) => "#4ade80",
        Some(Competency::Ownership) => "#fb923c",
        Some(Competency::Collaboration) => "#38bdf8",
        Some(Competency::ConflictResolution) => "#f472b6",
        Some(Competency::Leadership) => "#a78bfa",
        Some(Competency::GrowthMindset) => "#fbbf24",
        Some(Competency::Other(_)) | None => DEFAULT_COMPETENCY_COLOR,
    }
}

fn tip_icon(number: usize) -> &'static str {
    match number {
        1 => "💡",
        2 => "📌",
        _ => "⚡",
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Markdown
// ────────────────────────────────────────────────────────────────────────────

/// Blank scoring table: one row per rubric criterion plus totals.
fn scoring_table(kit: &InterviewKit) -> String {
    let mut out = String::from("| Criterion | Weight | Score (1–5) | Notes |\n|---|---|---|---|\n");
    for r in &kit.evaluation_rubric {
        out.push_str(&format!(
            "| {} | {} | _ | |\n",
            r.criterion,
            or_placeholder(r.weight.as_deref())
        ));
    }
    out.push_str(
        "\n**Total Score:** ___  \n\
         **Recommendation:** ☐ Strong Hire  ☐ Hire  ☐ No Hire  ☐ Strong No Hire\n\n\
         **Summary Notes:**\n\n",
    );
    out
}

/// Standalone candidate evaluation sheet.
pub fn scoring_template(kit: &InterviewKit) -> String {
    format!(
        "## Candidate Evaluation — {} ({})\n\n{}",
        kit.role,
        kit.level,
        scoring_table(kit)
    )
}

/// Flat markdown document. Section order is fixed: header, technical,
/// behavioral, rubric (with scoring table), tips.
pub fn build_markdown_export(kit: &InterviewKit) -> String {
    let generated = kit.generated_at.format("%B %d, %Y at %H:%M UTC");
    let mut lines = vec![
        format!("# Interview Kit: {} ({})", kit.role, kit.level),
        format!("*Generated on {generated}*\n"),
        "---\n".to_string(),
        "## 🔧 Technical Questions\n".to_string(),
    ];

    for (i, q) in kit.technical_questions.iter().enumerate() {
        let topics = if q.expected_topics.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            q.expected_topics.join(", ")
        };
        lines.extend([
            format!("### Q{}. {}", i + 1, q.question),
            format!(
                "- **Difficulty:** {}",
                q.difficulty.map(|d| d.as_str()).unwrap_or(PLACEHOLDER)
            ),
            format!("- **Rationale:** {}", or_placeholder(q.rationale.as_deref())),
            format!("- **Expected Topics:** {topics}"),
            String::new(),
        ]);
    }

    lines.extend(["---\n".to_string(), "## 💬 Behavioral Questions\n".to_string()]);
    for (i, q) in kit.behavioral_questions.iter().enumerate() {
        lines.extend([
            format!("### Q{}. {}", i + 1, q.question),
            format!(
                "- **Competency:** {}",
                or_placeholder(q.competency.as_ref().map(|c| c.label()))
            ),
            format!("- **Rationale:** {}", or_placeholder(q.rationale.as_deref())),
            String::new(),
        ]);
    }

    lines.extend(["---\n".to_string(), "## 📊 Evaluation Rubric\n".to_string()]);
    for r in &kit.evaluation_rubric {
        lines.extend([
            format!(
                "### {} (Weight: {})",
                r.criterion,
                or_placeholder(r.weight.as_deref())
            ),
            format!("- ✅ **Strong:** {}", or_placeholder(r.strong.as_deref())),
            format!("- 🟡 **Average:** {}", or_placeholder(r.average.as_deref())),
            format!("- ❌ **Weak:** {}", or_placeholder(r.weak.as_deref())),
            format!("- 💡 **Tip:** {}", or_placeholder(r.scoring_tip.as_deref())),
            String::new(),
        ]);
    }
    lines.push("#### 📝 Scoring Template\n".to_string());
    lines.push(scoring_table(kit));

    if !kit.interview_tips.is_empty() {
        lines.extend(["---\n".to_string(), "## 💡 Interviewer Tips\n".to_string()]);
        lines.extend(kit.interview_tips.iter().map(|tip| format!("- {tip}")));
    }

    lines.join("\n")
}

/// Download name: `interview_kit_<role>_<level>.md`, with every
/// non-alphanumeric character of the role replaced by `_`.
pub fn export_filename(kit: &InterviewKit) -> String {
    let role: String = kit
        .role
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("interview_kit_{role}_{}.md", kit.level)
}
