//! Core built-in rules: presence, membership, and the numeric and boolean
//! coercions.
//!
//! Presence and membership are gated rules; the coercions run
//! unconditionally and never report errors.

use serde_json::Value;

use super::raw;
use crate::path::Path;
use crate::report::ValidationError;

/// `required`: errors iff the value is empty. The value passes through
/// untouched either way.
pub fn required(path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    let mut errors = Vec::new();
    if raw::is_empty(&value) {
        errors.push(ValidationError::new(path, "{name} is required"));
    }
    (value, errors)
}

/// `in`: membership against a comma-separated option list. Skips empty
/// values; a missing argument means the empty option set.
pub fn one_of(path: &Path, value: Value, argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    let mut errors = Vec::new();
    if !raw::is_empty(&value) {
        let options: Vec<&str> = argument
            .map(|argument| argument.split(',').collect())
            .unwrap_or_default();
        if !raw::is_in(&value, &options) {
            errors.push(ValidationError::new(path, "{name} not in option"));
        }
    }
    (value, errors)
}

/// `integer`: unconditional coercion to an integer number.
pub fn integer(_path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    (Value::from(raw::to_integer(&value)), Vec::new())
}

/// `float`: unconditional coercion to a float number.
pub fn float(_path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    (Value::from(raw::to_float(&value)), Vec::new())
}

/// `boolean`: unconditional coercion to a boolean.
pub fn boolean(_path: &Path, value: Value, _argument: Option<&str>) -> (Value, Vec<ValidationError>) {
    (Value::Bool(raw::to_boolean(&value)), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(name: &str) -> Path {
        Path::root().field(name)
    }

    #[test]
    fn test_required_errors_once_on_empty_values() {
        for empty in [Value::Null, json!(""), json!([]), json!({})] {
            let (value, errors) = required(&at("field"), empty.clone(), None);
            assert_eq!(value, empty);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].path, "field");
            assert_eq!(errors[0].message, "{name} is required");
        }
    }

    #[test]
    fn test_required_accepts_falsy_but_present_values() {
        for present in [json!(0), json!(false), json!("x"), json!([0])] {
            let (_, errors) = required(&at("field"), present, None);
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn test_one_of_checks_membership_of_non_empty_values() {
        let (_, errors) = one_of(&at("color"), json!("red"), Some("red,green,blue"));
        assert!(errors.is_empty());

        let (_, errors) = one_of(&at("color"), json!("pink"), Some("red,green,blue"));
        assert_eq!(errors[0].message, "{name} not in option");

        let (_, errors) = one_of(&at("color"), Value::Null, Some("red,green,blue"));
        assert!(errors.is_empty());

        let (_, errors) = one_of(&at("color"), json!("red"), None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_coercions_replace_the_value_and_never_error() {
        let (value, errors) = integer(&at("age"), json!("20"), None);
        assert_eq!(value, json!(20));
        assert!(errors.is_empty());

        let (value, errors) = float(&at("height"), json!("180.2"), None);
        assert_eq!(value, json!(180.2));
        assert!(errors.is_empty());

        let (value, errors) = boolean(&at("isadmin"), json!("false"), None);
        assert_eq!(value, json!(false));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_coerced_zero_is_not_empty() {
        let (value, _) = integer(&at("count"), json!("0"), None);
        let (_, errors) = required(&at("count"), value, None);
        assert!(errors.is_empty());
    }
}
