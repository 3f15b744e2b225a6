//! Client-side form checks. A failure here never reaches the network.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::models::{parse_timestamp, Difficulty, NewContest, NewQuestion};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Login accepts a username or an email in `identifier`.
pub fn validate_login(identifier: &str, password: &str) -> Result<(), ValidationError> {
    if blank(identifier) || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
}

pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationError> {
    if blank(&form.username)
        || blank(&form.email)
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }
    if !looks_like_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if !form.agree_terms {
        return Err(ValidationError::TermsNotAccepted);
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// 0-100 in steps of 25: length >= 8, an uppercase letter, a digit, a symbol.
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    checks.iter().filter(|ok| **ok).count() as u8 * 25
}

pub fn strength_label(strength: u8) -> &'static str {
    match strength {
        0..=24 => "Weak",
        25..=49 => "Fair",
        50..=74 => "Good",
        _ => "Strong",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestForm {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Comma or space separated problem ids.
    pub problem_ids: String,
}

/// Check the form and build the request body.
pub fn validate_contest(form: &ContestForm) -> Result<NewContest, ValidationError> {
    if blank(&form.name) || blank(&form.start_time) || blank(&form.end_time) {
        return Err(ValidationError::MissingRequiredFields);
    }
    let start = parse_form_time(&form.start_time)?;
    let end = parse_form_time(&form.end_time)?;
    if end <= start {
        return Err(ValidationError::EndBeforeStart);
    }

    let problem_ids = form
        .problem_ids
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect();

    Ok(NewContest {
        name: form.name.trim().to_string(),
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
        problem_ids,
    })
}

fn parse_form_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_timestamp(raw).ok_or_else(|| ValidationError::InvalidDateTime(raw.trim().to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionForm {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub constraints: String,
    /// Comma separated.
    pub tags: String,
}

pub fn validate_question(form: &QuestionForm) -> Result<NewQuestion, ValidationError> {
    if blank(&form.title) || blank(&form.description) {
        return Err(ValidationError::MissingRequiredFields);
    }
    let difficulty =
        Difficulty::parse(&form.difficulty).ok_or(ValidationError::MissingRequiredFields)?;
    Ok(NewQuestion {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        difficulty,
        constraints: form.constraints.trim().to_string(),
        tags: form
            .tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Code must be present before run or submit.
pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if blank(code) {
        Err(ValidationError::EmptyCode)
    } else {
        Ok(())
    }
}
