//! Declarative form rules shared by every create/edit form.
//!
//! Each rule returns `Result<(), String>`; a form collects them per field into
//! [`FieldErrors`], which keeps only the first failure of each field so it can
//! be rendered beneath that field.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::error::AppError;

pub type RuleResult = Result<(), String>;

/// Implemented by every create/edit form.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;

    /// Validates a single field, used for per-field checks on blur.
    fn validate_field(&self, field: &str) -> Option<String> {
        match self.validate() {
            Ok(()) => None,
            Err(errors) => errors.get(field).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `result` against `field` unless that field already failed.
    pub fn check(&mut self, field: &str, result: RuleResult) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push(FieldError {
                field: field.to_string(),
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn remove(&mut self, field: &str) {
        self.0.retain(|e| e.field != field);
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

pub fn required(value: &str, label: &str) -> RuleResult {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    Ok(())
}

/// Character-count bounds on the trimmed value.
pub fn length(value: &str, label: &str, min: usize, max: usize) -> RuleResult {
    let count = value.trim().chars().count();
    if count < min {
        return Err(format!("{label} must be at least {min} characters"));
    }
    if count > max {
        return Err(format!("{label} must be at most {max} characters"));
    }
    Ok(())
}

pub fn pattern(value: &str, re: &Regex, message: &str) -> RuleResult {
    if !re.is_match(value.trim()) {
        return Err(message.to_string());
    }
    Ok(())
}

pub fn range<T>(value: T, label: &str, min: T, max: T) -> RuleResult
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(format!("{label} must be between {min} and {max}"));
    }
    Ok(())
}

pub fn at_least<T>(value: T, label: &str, min: T) -> RuleResult
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min {
        return Err(format!("{label} must be at least {min}"));
    }
    Ok(())
}

pub fn url(value: &str, label: &str) -> RuleResult {
    match reqwest::Url::parse(value.trim()) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.host_str().is_some() => Ok(()),
        _ => Err(format!("{label} must be a valid URL")),
    }
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

pub fn email(value: &str) -> RuleResult {
    pattern(value, &EMAIL_RE, "Enter a valid email address")
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date(value: &str, label: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("{label} must be a date (YYYY-MM-DD)"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn not_in_past(value: NaiveDate, label: &str) -> RuleResult {
    if value < today() {
        return Err(format!("{label} cannot be in the past"));
    }
    Ok(())
}

pub fn not_in_future(value: NaiveDate, label: &str) -> RuleResult {
    if value > today() {
        return Err(format!("{label} cannot be in the future"));
    }
    Ok(())
}

/// End must not come before start.
pub fn date_order(start: NaiveDate, end: NaiveDate) -> RuleResult {
    if end < start {
        return Err("End date must be on or after the start date".to_string());
    }
    Ok(())
}
