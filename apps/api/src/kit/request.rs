//! Inbound kit parameters: validation and role normalization.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::kit::models::Level;

pub const TECHNICAL_COUNT_RANGE: RangeInclusive<u32> = 3..=10;
pub const BEHAVIORAL_COUNT_RANGE: RangeInclusive<u32> = 2..=8;
pub const DEFAULT_TECHNICAL_COUNT: u32 = 6;
pub const DEFAULT_BEHAVIORAL_COUNT: u32 = 4;
const MIN_ROLE_CHARS: usize = 3;

/// Quick-fill role suggestions offered by the front end.
pub const EXAMPLE_ROLES: &[&str] = &[
    "Backend Engineer",
    "Frontend Engineer",
    "Full Stack Engineer",
    "Data Scientist",
    "ML Engineer",
    "DevOps Engineer",
    "Product Manager",
    "SEO Specialist",
    "Mobile Developer (iOS/Android)",
    "Security Engineer",
    "QA Engineer",
    "Cloud Architect",
];

/// Request body for full kit generation, as typed by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateKitRequest {
    pub role: String,
    pub level: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default = "default_technical_count")]
    pub technical_count: u32,
    #[serde(default = "default_behavioral_count")]
    pub behavioral_count: u32,
}

fn default_technical_count() -> u32 {
    DEFAULT_TECHNICAL_COUNT
}

fn default_behavioral_count() -> u32 {
    DEFAULT_BEHAVIORAL_COUNT
}

/// Validated, normalized generation parameters. Only `validate` builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitRequest {
    role: String,
    level: Level,
    focus: String,
    technical_count: u32,
    behavioral_count: u32,
}

impl KitRequest {
    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn focus(&self) -> &str {
        &self.focus
    }

    pub fn technical_count(&self) -> u32 {
        self.technical_count
    }

    pub fn behavioral_count(&self) -> u32 {
        self.behavioral_count
    }
}

impl GenerateKitRequest {
    /// Checks role, level and counts, normalizing the role on success.
    /// Focus passes through untouched.
    pub fn validate(&self) -> Result<KitRequest, AppError> {
        let level = validate_role_and_level(&self.role, &self.level)?;

        if !TECHNICAL_COUNT_RANGE.contains(&self.technical_count) {
            return Err(AppError::Validation(format!(
                "Technical question count must be between {} and {}.",
                TECHNICAL_COUNT_RANGE.start(),
                TECHNICAL_COUNT_RANGE.end()
            )));
        }
        if !BEHAVIORAL_COUNT_RANGE.contains(&self.behavioral_count) {
            return Err(AppError::Validation(format!(
                "Behavioral question count must be between {} and {}.",
                BEHAVIORAL_COUNT_RANGE.start(),
                BEHAVIORAL_COUNT_RANGE.end()
            )));
        }

        Ok(KitRequest {
            role: normalize_role(&self.role),
            level,
            focus: self.focus.clone(),
            technical_count: self.technical_count,
            behavioral_count: self.behavioral_count,
        })
    }
}

/// Role must be at least 3 characters once trimmed; level must be one of the
/// three level strings exactly.
pub fn validate_role_and_level(role: &str, level: &str) -> Result<Level, AppError> {
    let role = role.trim();
    if role.is_empty() {
        return Err(AppError::Validation("Please enter a job role.".to_string()));
    }
    if role.chars().count() < MIN_ROLE_CHARS {
        return Err(AppError::Validation(format!(
            "Job role must be at least {MIN_ROLE_CHARS} characters."
        )));
    }
    level
        .parse::<Level>()
        .map_err(|_| AppError::Validation("Please select a valid experience level.".to_string()))
}

/// Trims and title-cases a job title: the first letter of every run of
/// letters is upper-cased, the rest lower-cased ("ios/android dev" → "Ios/Android Dev").
pub fn normalize_role(role: &str) -> String {
    let mut out = String::with_capacity(role.len());
    let mut prev_is_alpha = false;
    for ch in role.trim().chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}
