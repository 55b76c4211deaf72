// All LLM prompt constants for interview kit generation.
// Reuses the JSON-only fragment from llm_client::prompts.

/// Persona half of the system prompt. Joined with `JSON_ONLY_SYSTEM` by the builder.
pub const INTERVIEWER_PERSONA: &str = "You are an expert technical recruiter and engineering interview specialist.
Your job is to create highly structured, role-specific interview packages.";

/// Quality rules appended after the JSON-only rule.
pub const INTERVIEWER_RULES: &str = "Every question must be directly relevant to the specified role and experience level.
Avoid generic, trivia-based, or recycled interview questions.";

pub const JUNIOR_GUIDANCE: &str =
    "Focus on fundamentals, core concepts, basic debugging, and simple problem solving.";
pub const MID_LEVEL_GUIDANCE: &str =
    "Focus on applied knowledge, trade-offs, debugging real scenarios, and collaboration.";
pub const SENIOR_GUIDANCE: &str =
    "Focus on system design, architecture decisions, scalability, mentorship, and strategic thinking.";

/// Full kit prompt.
/// Replace: {role}, {level}, {focus_line}, {guidance}, {n_tech}, {n_beh}
pub const KIT_PROMPT_TEMPLATE: &str = r#"Generate a complete interview kit for the following:
- Role: {role}
- Experience Level: {level}
- Special Focus: {focus_line}

Calibration guidance: {guidance}

Generate exactly {n_tech} technical questions and exactly {n_beh} behavioral questions.

Return ONLY this JSON structure (no extra text):

{
  "role": "{role}",
  "level": "{level}",
  "technical_questions": [
    {
      "id": 1,
      "question": "...",
      "rationale": "Why this question matters for the role and level",
      "expected_topics": ["topic1", "topic2"],
      "difficulty": "Easy|Medium|Hard"
    }
    // ... {n_tech} questions total
  ],
  "behavioral_questions": [
    {
      "id": 1,
      "question": "...",
      "competency": "Communication|Ownership|Collaboration|Conflict Resolution|Leadership|Growth Mindset",
      "rationale": "Why this competency matters at this level"
    }
    // ... {n_beh} questions total
  ],
  "evaluation_rubric": [
    {
      "criterion": "Technical Accuracy",
      "weight": "30%",
      "strong": "What a strong answer looks like",
      "average": "What an average answer looks like",
      "weak": "What a weak answer looks like",
      "scoring_tip": "Quick tip for the interviewer"
    },
    {
      "criterion": "Depth of Understanding",
      "weight": "25%",
      "strong": "...",
      "average": "...",
      "weak": "...",
      "scoring_tip": "..."
    },
    {
      "criterion": "Problem-Solving Approach",
      "weight": "25%",
      "strong": "...",
      "average": "...",
      "weak": "...",
      "scoring_tip": "..."
    },
    {
      "criterion": "Communication Clarity",
      "weight": "20%",
      "strong": "...",
      "average": "...",
      "weak": "...",
      "scoring_tip": "..."
    }
  ],
  "interview_tips": [
    "Role-specific tip 1",
    "Role-specific tip 2",
    "Role-specific tip 3"
  ]
}

Give every question a distinct id, numbered from 1 within its list."#;

/// Single-question regeneration prompt.
/// Replace: {kind}, {role}, {level}, {focus}, {old_question}, {shape}
pub const REGEN_PROMPT_TEMPLATE: &str = r#"Regenerate a single {kind} interview question for:
- Role: {role}
- Level: {level}
- Focus (if any): {focus}
- Old question to replace: {old_question}

The new question must be meaningfully different from the old one.
Return ONLY valid JSON for a single question object matching this shape:

{shape}"#;

pub const TECHNICAL_QUESTION_SHAPE: &str = r#"{"id": <keep same id>, "question": "...", "rationale": "...", "expected_topics": ["..."], "difficulty": "Easy|Medium|Hard"}"#;

pub const BEHAVIORAL_QUESTION_SHAPE: &str = r#"{"id": <keep same id>, "question": "...", "competency": "Communication|Ownership|Collaboration|Conflict Resolution|Leadership|Growth Mindset", "rationale": "..."}"#;
