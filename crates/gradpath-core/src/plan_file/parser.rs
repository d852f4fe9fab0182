//! Plan TOML parser with validation.
//!
//! Parses a `plan.toml` string into a [`PlanToml`] and validates:
//! - At least one required course is listed.
//! - No course id is blank.
//! - Required ids are unique, and so are completed ids.

use std::collections::HashSet;

use thiserror::Error;

use super::toml_format::PlanToml;

/// Errors that can occur during plan parsing and validation.
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("plan must list at least one required course")]
    NoCourses,

    #[error("course ids must not be blank")]
    EmptyCourseId,

    #[error("duplicate required course: {0:?}")]
    DuplicateCourse(String),

    #[error("duplicate completed course: {0:?}")]
    DuplicateCompleted(String),
}

/// Parse and validate a `plan.toml` string.
pub fn parse_plan_toml(content: &str) -> Result<PlanToml, PlanParseError> {
    let plan: PlanToml = toml::from_str(content)?;
    validate(&plan)?;
    Ok(plan)
}

fn validate(plan: &PlanToml) -> Result<(), PlanParseError> {
    if plan.courses.required.is_empty() {
        return Err(PlanParseError::NoCourses);
    }

    let mut all = plan.courses.required.iter().chain(&plan.courses.completed);
    if all.any(|id| id.trim().is_empty()) {
        return Err(PlanParseError::EmptyCourseId);
    }

    let mut seen = HashSet::new();
    for id in &plan.courses.required {
        if !seen.insert(id) {
            return Err(PlanParseError::DuplicateCourse(id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for id in &plan.courses.completed {
        if !seen.insert(id) {
            return Err(PlanParseError::DuplicateCompleted(id.clone()));
        }
    }

    Ok(())
}
