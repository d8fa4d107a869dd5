use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::RuleResult;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d{10,15}$").unwrap());

/// Customer phone: 10 to 15 digits, optional leading `+`.
pub fn validate_phone(phone: &str) -> RuleResult {
    if !PHONE_RE.is_match(&normalize_phone(phone)) {
        return Err("Phone must be 10 to 15 digits".to_string());
    }
    Ok(())
}

/// Drops spaces, dashes and brackets. Anything else is kept so the format
/// check still sees it.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}
