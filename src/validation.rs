//! Request field validation.

use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRule {
    pub required: bool,
    pub format: Option<Format>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldRule {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn email(mut self) -> Self {
        self.format = Some(Format::Email);
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate `(field, value, rule)` triples in order; the first violation wins.
    pub fn validate(fields: &[(&str, &str, FieldRule)]) -> Result<(), AppError> {
        for (name, value, rule) in fields {
            validate_field(name, value, rule)?;
        }
        Ok(())
    }
}

fn validate_field(name: &str, value: &str, rule: &FieldRule) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if rule.required {
            return Err(AppError::BadRequest(format!("{} is required", name)));
        }
        return Ok(());
    }
    let len = value.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(AppError::BadRequest(format!(
                "{} must be at least {} characters",
                name, min
            )));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(AppError::BadRequest(format!(
                "{} must be at most {} characters",
                name, max
            )));
        }
    }
    match rule.format {
        Some(Format::Email) if !EMAIL.is_match(trimmed) => Err(AppError::BadRequest(format!(
            "{} must be a valid email",
            name
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_field_is_rejected() {
        let err = RequestValidator::validate(&[("name", "   ", FieldRule::required())]).unwrap_err();
        assert_eq!(err.to_string(), "bad request: name is required");
    }

    #[test]
    fn optional_blank_field_is_skipped() {
        assert!(RequestValidator::validate(&[("nick", "", FieldRule::default().min_length(3))]).is_ok());
    }

    #[test]
    fn length_bounds_count_characters() {
        let rule = FieldRule::required().min_length(3).max_length(4);
        assert!(RequestValidator::validate(&[("p", "äöü", rule)]).is_ok());
        assert!(RequestValidator::validate(&[("p", "ab", rule)]).is_err());
        assert!(RequestValidator::validate(&[("p", "abcde", rule)]).is_err());
    }

    #[test]
    fn email_format() {
        let rule = FieldRule::required().email();
        assert!(RequestValidator::validate(&[("email", "test@alterra.id", rule)]).is_ok());
        assert!(RequestValidator::validate(&[("email", "test@alterra", rule)]).is_err());
        assert!(RequestValidator::validate(&[("email", "te st@alterra.id", rule)]).is_err());
    }

    #[test]
    fn first_violation_wins() {
        let err = RequestValidator::validate(&[
            ("name", "", FieldRule::required()),
            ("email", "x", FieldRule::required().email()),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
