//! Shared predicates and transforms the rule set is built on.
//!
//! Everything here is total and pure: no panics, no errors, defined output
//! for every [`Value`]. Custom rules are encouraged to reuse these instead
//! of re-deriving emptiness or coercion behavior.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?:[a-z]{2}|com|org|net|gov|mil|biz|info|mobi|name|aero|jobs|museum)\b",
    )
    .unwrap()
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

// ASCII classes only; `\w` in the regex crate is Unicode-aware.
static SLUG_STRIP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").unwrap());

const SPECIAL_CHARS: [(&str, &str); 8] = [
    ("&", "&amp;"),
    ("\"", "&quot;"),
    ("'", "&#x27;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("/", "&#x2F;"),
    ("\\", "&#x5C;"),
    ("`", "&#96;"),
];

/// The shared emptiness predicate.
///
/// Empty means null, the empty string, the empty array, or the empty
/// object. Numbers and booleans are never empty, whatever their value,
/// so a coerced `0` or `false` cannot trip a later presence check.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Membership test against a fixed option set. String identity only:
/// non-string values are never members.
pub fn is_in(value: &Value, options: &[&str]) -> bool {
    match value {
        Value::String(s) => options.iter().any(|option| option == s),
        _ => false,
    }
}

/// Matches E.164 phone numbers (`+` then 2 to 15 digits, no leading zero).
pub fn is_phone(input: &str) -> bool {
    PHONE_REGEX.is_match(input)
}

/// Matches common lowercase email addresses.
pub fn is_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input)
}

/// Coerces a string to slug form: lowercase, spaces to hyphens, then strip
/// anything outside `[a-z0-9_-]`.
pub fn slug(input: &str) -> String {
    let lowered = input.to_lowercase().replace(' ', "-");
    SLUG_STRIP_REGEX.replace_all(&lowered, "").into_owned()
}

/// Coerces toward an integer. Numbers truncate, numeric-looking strings
/// parse (fractions truncate), everything else is `0`.
pub fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                i
            } else {
                match trimmed.parse::<f64>() {
                    Ok(f) if f.is_finite() => f.trunc() as i64,
                    _ => 0,
                }
            }
        }
        _ => 0,
    }
}

/// Coerces toward a float. Numbers pass through, numeric-looking strings
/// parse, everything else is `0`. Non-finite results collapse to `0`
/// because JSON numbers cannot carry them.
pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => f,
            _ => 0.0,
        },
        _ => 0.0,
    }
}

/// Coerces toward a boolean.
///
/// Strings are `false` only for the literals `"false"` and `"0"`; every
/// other string, the empty one included, is `true`. Non-strings follow
/// truthiness: null and zero are `false`, containers are always `true`.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::String(s) => s != "false" && s != "0",
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Escapes HTML special characters as named/numeric entities.
///
/// `&` is replaced first so already-escaped text does not double-escape
/// the ampersands this pass introduces.
pub fn escape(input: &str) -> String {
    let mut out = input.to_string();
    for (plain, entity) in SPECIAL_CHARS {
        out = out.replace(plain, entity);
    }
    out
}

/// Reverses [`escape`]: entities restore in reverse table order, `&amp;`
/// last.
pub fn unescape(input: &str) -> String {
    let mut out = input.to_string();
    for &(plain, entity) in SPECIAL_CHARS.iter().rev() {
        out = out.replace(entity, plain);
    }
    out
}
