//! Form validation shared by the book, customer and loan forms
//!
//! Each form is received as raw text, then checked field by field:
//! presence, then length or range, then the character allow-list. Only the
//! first failing rule of a field is reported, but every field is checked, so
//! one submission can report several fields at once.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidationErrors;

use crate::config::ValidationConfig;

/// Characters allowed in book titles
pub static BOOK_NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[a-zA-Z0-9\s\-\.,!?'"]+$"#).expect("valid book name pattern"));

/// Characters allowed in person and place names
pub static PLAIN_NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-\.]+$").expect("valid plain name pattern"));

pub const INVALID_INTEGER: &str = "Not a valid integer value";
pub const INVALID_DATE: &str = "Not a valid date value";
pub const INVALID_CHOICE: &str = "Not a valid choice";

/// Which optional rules apply to submitted forms
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationPolicy {
    pub enforce_charsets: bool,
}

impl From<&ValidationConfig> for ValidationPolicy {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            enforce_charsets: config.enforce_charsets,
        }
    }
}

/// Field name to error message, one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already failed an earlier rule
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if !self.0.contains_key(field) {
            self.0.insert(field.to_string(), message.into());
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Take the first message of every field rejected by a `validator` derive
    pub fn absorb(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                self.add(&field, message);
            }
        }
    }

    /// Allow-list check, skipped for fields that already failed
    pub fn check_charset(&mut self, field: &str, value: Option<&str>, charset: &Regex, message: &str) {
        if self.contains(field) {
            return;
        }
        if let Some(value) = value {
            if !charset.is_match(value) {
                self.add(field, message);
            }
        }
    }

    /// Reorder to follow the form's field declaration order
    pub fn ordered(mut self, fields: &[&str]) -> Self {
        let rank = |name: &str| fields.iter().position(|f| *f == name).unwrap_or(fields.len());
        self.0.sort_by(|a, _, b, _| rank(a.as_str()).cmp(&rank(b.as_str())));
        self
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

// ---------------------------------------------------------------------------
// Raw field parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Deserialize a form or JSON scalar as text; blank values become `None`
///
/// HTML forms send every value as a string while JSON clients send numbers,
/// so numeric fields are kept as text until validation parses them.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value
        .map(|scalar| match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        })
        .filter(|text| !text.trim().is_empty()))
}

/// Parse an integer field; out-of-range values saturate so that the range
/// rule, not the type rule, reports them
pub fn parse_integer(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<i32> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(i32::try_from(n).unwrap_or(if n < 0 { i32::MIN } else { i32::MAX })),
        // Too large for any bound, so saturate and let the range rule report it
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(i32::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Some(i32::MIN),
        Err(_) => {
            errors.add(field, INVALID_INTEGER);
            None
        }
    }
}

/// Parse an identifier field
pub fn parse_id(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, INVALID_INTEGER);
            None
        }
    }
}

/// Parse a required ISO `YYYY-MM-DD` date
pub fn parse_date(errors: &mut FieldErrors, field: &str, raw: Option<&str>, required: &str) -> Option<NaiveDate> {
    let Some(raw) = raw else {
        errors.add(field, required);
        return None;
    };
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, INVALID_DATE);
            None
        }
    }
}

/// Parse a required value from a fixed set of choices
pub fn parse_choice<T: FromStr>(errors: &mut FieldErrors, field: &str, raw: Option<&str>, required: &str) -> Option<T> {
    let Some(raw) = raw else {
        errors.add(field, required);
        return None;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}
