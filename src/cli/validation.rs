//! Input checks the front end applies before calling into the manager.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be at least 2 characters")]
    Name,
    #[error("business name must be at least 2 characters")]
    BusinessName,
    #[error("`{0}` is not a valid email address")]
    Email(String),
    #[error("`{0}` is not a valid amount")]
    Amount(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amounts have at most two decimal places")]
    Precision,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("static email pattern"))
}

fn has_min_chars(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= MIN_NAME_CHARS
}

pub fn is_valid_name(value: &str) -> bool {
    has_min_chars(value)
}

pub fn is_valid_business_name(value: &str) -> bool {
    has_min_chars(value)
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

pub fn validate_name(value: &str) -> Result<String, ValidationError> {
    if is_valid_name(value) {
        Ok(value.trim().to_string())
    } else {
        Err(ValidationError::Name)
    }
}

pub fn validate_business_name(value: &str) -> Result<String, ValidationError> {
    if is_valid_business_name(value) {
        Ok(value.trim().to_string())
    } else {
        Err(ValidationError::BusinessName)
    }
}

pub fn validate_email(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if is_valid_email(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::Email(trimmed.to_string()))
    }
}

/// Parses user-entered currency such as `12`, `12.5` or `$12.50`.
///
/// Only plain decimal notation is accepted, so exponents and `inf`/`NaN`
/// spellings are rejected before the two-decimal check.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    if !is_plain_decimal(digits) {
        return Err(ValidationError::Amount(trimmed.to_string()));
    }
    if let Some((_, fraction)) = digits.split_once('.') {
        if fraction.len() > 2 {
            return Err(ValidationError::Precision);
        }
    }
    let value: f64 = digits
        .parse()
        .map_err(|_| ValidationError::Amount(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::Amount(trimmed.to_string()));
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(value)
}

fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    unsigned.chars().any(|c| c.is_ascii_digit())
        && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && unsigned.matches('.').count() <= 1
}
