//! Pluggable format rules: email, phone, slug, and datetime.
//!
//! Registered by [`RuleRegistry::full`] but not part of the minimal
//! built-in set, so embedders can swap stricter validators under the same
//! names.
//!
//! [`RuleRegistry::full`]: super::RuleRegistry::full

use std::fmt::{self, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use super::raw;
use crate::path::Path;
use crate::report::ValidationError;

/// `email`: gated format check against the common-address matcher.
pub fn email(path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    let mut errors = Vec::new();
    if !raw::is_empty(&value) {
        let ok = value.as_str().map(raw::is_email).unwrap_or(false);
        if !ok {
            errors.push(ValidationError::new(path, "{name} not valid email"));
        }
    }
    (value, errors)
}

/// `phone`: gated format check for E.164 numbers.
pub fn phone(path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    let mut errors = Vec::new();
    if !raw::is_empty(&value) {
        let ok = value.as_str().map(raw::is_phone).unwrap_or(false);
        if !ok {
            errors.push(ValidationError::new(path, "{name} not valid phone"));
        }
    }
    (value, errors)
}

/// `slug`: unconditional coercion to slug form. Non-strings coerce to the
/// empty string.
pub fn slug(_path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    let coerced = match value.as_str() {
        Some(s) => Value::String(raw::slug(s)),
        None => Value::String(String::new()),
    };
    (coerced, Vec::new())
}

/// `datetime`: gated strict parse and canonical reformat.
///
/// The argument is a chrono strftime format; a value that parses under it
/// is rewritten in that same format (so unpadded fields come back padded).
/// Without an argument the rule accepts RFC 3339 and canonicalizes with
/// [`DateTime::to_rfc3339`].
pub fn datetime(path: &Path, value: Value, argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    let mut errors = Vec::new();
    let mut value = value;
    if !raw::is_empty(&value) {
        match value.as_str().and_then(|s| reformat(s, argument)) {
            Some(canonical) => value = Value::String(canonical),
            None => errors.push(ValidationError::new(path, "{name} not valid datetime")),
        }
    }
    (value, errors)
}

// A date-only format fails the datetime parse with missing time fields,
// so trying datetime, then date, then time covers all three shapes with
// one format argument.
fn reformat(input: &str, format: Option<&str>) -> Option<String> {
    let Some(format) = format else {
        return DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|parsed| parsed.to_rfc3339());
    };
    if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
        return render(parsed.format(format));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(input, format) {
        return render(parsed.format(format));
    }
    if let Ok(parsed) = NaiveTime::parse_from_str(input, format) {
        return render(parsed.format(format));
    }
    None
}

// The chrono parsers ignore fields outside their own domain, so a mixed
// format such as "%m/%d %H:%M" can win the cascade as a bare time whose
// rendering then lacks the date fields. DelayedFormat surfaces that as a
// Display error, which to_string would turn into a panic.
fn render(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}
