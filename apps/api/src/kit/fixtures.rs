//! Canned model output for tests.

use serde_json::{json, Value};

pub fn technical_json(id: u32) -> Value {
    json!({
        "id": id,
        "question": format!("Technical question {id}: how would you design a rate limiter?"),
        "rationale": "Probes distributed systems judgement",
        "expected_topics": ["token bucket", "consistency"],
        "difficulty": "Hard"
    })
}

pub fn behavioral_json(id: u32) -> Value {
    json!({
        "id": id,
        "question": format!("Behavioral question {id}: tell me about a time you disagreed with a design."),
        "competency": "Conflict Resolution",
        "rationale": "Seniors must resolve disagreements constructively"
    })
}

/// A well-formed kit body with `n_tech` technical and `n_beh` behavioral questions.
pub fn kit_json(n_tech: u32, n_beh: u32) -> String {
    json!({
        "role": "Backend Engineer",
        "level": "Senior",
        "technical_questions": (1..=n_tech).map(technical_json).collect::<Vec<_>>(),
        "behavioral_questions": (1..=n_beh).map(behavioral_json).collect::<Vec<_>>(),
        "evaluation_rubric": [
            {
                "criterion": "Technical Accuracy",
                "weight": "30%",
                "strong": "Precise and correct",
                "average": "Mostly correct",
                "weak": "Frequent errors",
                "scoring_tip": "Ask for a concrete example"
            },
            {
                "criterion": "Communication Clarity",
                "weight": "20%",
                "strong": "Structured answers",
                "average": "Some rambling",
                "weak": "Hard to follow"
            }
        ],
        "interview_tips": [
            "Ask about on-call experience",
            "Probe for trade-offs",
            "Leave time for candidate questions"
        ]
    })
    .to_string()
}

/// A kit the way a careless model writes it: quoted and null ids, nulls for
/// optional lists, a placeholder copied from the prompt.
pub fn loosely_typed_kit_json() -> String {
    json!({
        "technical_questions": [
            {"id": "1", "question": "How does a B-tree index speed up lookups?",
             "expected_topics": null, "difficulty": "medium"},
            {"id": null, "question": "When would you reach for a message queue?",
             "rationale": null},
            {"id": "<keep same id>", "question": "How do you version a public API?",
             "expected_topics": ["semver", "deprecation"], "difficulty": null}
        ],
        "behavioral_questions": [
            {"id": "1", "question": "Tell me about a deadline you missed.", "competency": null},
            {"id": 2, "question": "Describe feedback that changed how you work."}
        ],
        "evaluation_rubric": [
            {"criterion": "Technical Accuracy", "weight": null, "strong": "Precise"}
        ],
        "interview_tips": null
    })
    .to_string()
}
