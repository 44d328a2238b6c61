//! Cell-level code tables.
//!
//! Every function here maps one trimmed source cell to its recoded value and
//! returns `None` for anything outside the documented domain.

use ets_common::{parse_f64, parse_i64};
use ets_model::{Education, Employment, Ethnicity, Sex};

/// Income as written by one site: a thousands separator followed by a space.
pub const MALFORMED_INCOME: &str = "250, 000";
const MALFORMED_INCOME_VALUE: &str = "250000";

/// Tokens the source files use for an explicitly missing cell.
const MISSING_TOKENS: [&str; 3] = ["NA", "N/A", "."];

/// Whether a cell is an explicit missing marker rather than a value.
pub fn is_missing_token(text: &str) -> bool {
    MISSING_TOKENS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(text.trim()))
}

/// Binary indicator: only 0 and 1 are in range.
pub fn flag(text: &str) -> Option<i64> {
    parse_i64(text).filter(|value| *value == 0 || *value == 1)
}

/// Labeled smoking state.
pub fn smoking(text: &str) -> Option<i64> {
    match text.trim() {
        "1=Yes" => Some(1),
        "2=No" => Some(0),
        _ => None,
    }
}

pub fn number(text: &str) -> Option<f64> {
    parse_f64(text)
}

pub fn income(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed == MALFORMED_INCOME {
        return parse_f64(MALFORMED_INCOME_VALUE);
    }
    parse_f64(trimmed)
}

pub fn sex(text: &str) -> Option<String> {
    parse_i64(text)
        .and_then(Sex::from_code)
        .map(|sex| sex.as_str().to_string())
}

pub fn ethnicity(text: &str) -> Option<String> {
    parse_i64(text)
        .and_then(Ethnicity::from_code)
        .map(|ethnicity| ethnicity.as_str().to_string())
}

pub fn employment(text: &str) -> Option<String> {
    parse_i64(text)
        .and_then(Employment::from_code)
        .map(|employment| employment.as_str().to_string())
}

pub fn education(text: &str) -> Option<String> {
    parse_i64(text)
        .and_then(Education::from_code)
        .map(|education| education.as_str().to_string())
}
