// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.
//!
//! Every check runs before any store access. Violations are collected, not
//! short-circuited, so the client sees all of them at once.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use travelog_common::{LoginRequest, NewStoryRequest, SignupRequest, UserId};

use crate::auth::{password_violations, PasswordRequirements};
use crate::error::AppError;
use crate::storage::NewStory;

// Common validation constants
const MIN_FULL_NAME_LENGTH: usize = 2;
const MAX_FULL_NAME_LENGTH: usize = 50;
const MIN_EMAIL_LENGTH: usize = 2;
const MAX_EMAIL_LENGTH: usize = 50;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Full name must be between {} and {} characters", MIN_FULL_NAME_LENGTH, MAX_FULL_NAME_LENGTH)]
    InvalidFullName,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("visitedDate {0} is not a representable date")]
    InvalidDate(i64),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<Vec<ValidationError>> for AppError {
    fn from(errors: Vec<ValidationError>) -> Self {
        AppError::InvalidInput(errors.iter().map(ToString::to_string).collect())
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

/// Validate a display name
pub fn validate_full_name(full_name: &str) -> ValidationResult<&str> {
    let len = full_name.trim().chars().count();
    if !(MIN_FULL_NAME_LENGTH..=MAX_FULL_NAME_LENGTH).contains(&len) {
        return Err(ValidationError::InvalidFullName);
    }
    Ok(full_name)
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    let len = email.chars().count();
    if !(MIN_EMAIL_LENGTH..=MAX_EMAIL_LENGTH).contains(&len) {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address must be between {MIN_EMAIL_LENGTH} and {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password against the configured rules, one error per broken rule
pub fn validate_password(
    password: &str,
    requirements: &PasswordRequirements,
) -> Vec<ValidationError> {
    password_violations(password, requirements)
        .into_iter()
        .map(ValidationError::InvalidPassword)
        .collect()
}

/// Validate a signup request
pub fn validate_signup(
    req: &SignupRequest,
    requirements: &PasswordRequirements,
) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_full_name(&req.full_name) {
        errors.push(e);
    }
    if let Err(e) = validate_email(&req.email) {
        errors.push(e);
    }
    errors.extend(validate_password(&req.password, requirements));

    finish(errors)
}

/// Login only checks presence; the stored hash decides the rest
pub fn validate_login(req: &LoginRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if req.email.is_empty() {
        errors.push(ValidationError::MissingField("email"));
    }
    if req.password.is_empty() {
        errors.push(ValidationError::MissingField("password"));
    }

    finish(errors)
}

/// Convert a client timestamp in epoch milliseconds
pub fn parse_visited_date(millis: i64) -> ValidationResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(ValidationError::InvalidDate(millis))
}

/// Validate a new story request and build the record to persist
pub fn validate_story(owner: UserId, req: NewStoryRequest) -> Result<NewStory, AppError> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("title", &req.title),
        ("story", &req.story),
        ("imageUrl", &req.image_url),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::MissingField(name));
        }
    }

    // An empty list is accepted; an absent one is not
    if req.visited_location.is_none() {
        errors.push(ValidationError::MissingField("visitedLocation"));
    }

    let visited_date = match req.visited_date.map(parse_visited_date) {
        Some(Ok(date)) => Some(date),
        Some(Err(e)) => {
            errors.push(e);
            None
        },
        None => {
            errors.push(ValidationError::MissingField("visitedDate"));
            None
        },
    };

    match (visited_date, req.visited_location) {
        (Some(visited_date), Some(visited_location)) if errors.is_empty() => Ok(NewStory {
            user_id: owner,
            title: req.title,
            story: req.story,
            visited_location,
            visited_date,
            image_url: req.image_url,
            is_favourite: false,
        }),
        _ => Err(errors.into()),
    }
}
