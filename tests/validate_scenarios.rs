//! Validation Scenario Tests
//!
//! End-to-end runs over realistic payload schemas:
//! - A nested profile: scalar chains, a tagged required list, a list of
//!   objects, a custom rule, boolean coercion
//! - The compact custom-list scenario
//! - A JSON-authored schema driving the same engine

use scrub::rules::raw;
use scrub::{validate, Schema, ValidationError};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn err(path: &str, message: &str) -> ValidationError {
    ValidationError {
        path: path.to_string(),
        message: message.to_string(),
    }
}

fn profile_schema() -> Schema {
    Schema::fields([
        ("name", Schema::rules("required")),
        ("slug", Schema::rules("required|slug")),
        ("age", Schema::rules("required|integer")),
        ("height", Schema::rules("required|float")),
        ("birthday", Schema::rules("required|datetime:%Y-%m-%d")),
        (
            "contact",
            Schema::fields([
                ("email", Schema::rules("required|email")),
                ("phones", Schema::list("required", "required|phone")),
                (
                    "addresses",
                    Schema::items(Schema::fields([
                        ("region", "required"),
                        ("building", "required"),
                    ])),
                ),
            ]),
        ),
        (
            "projects",
            Schema::custom(|path, value, _root| {
                let mut errors = Vec::new();
                match value.as_array() {
                    None => {
                        errors.push(ValidationError::new(path, "{name} should be a list"));
                    }
                    Some(projects) if projects.is_empty() => {
                        errors.push(ValidationError::new(path, "{name} is required"));
                    }
                    Some(projects) => {
                        for (index, project) in projects.iter().enumerate() {
                            let titled = project
                                .as_object()
                                .and_then(|project| project.get("title"))
                                .map(|title| !raw::is_empty(title))
                                .unwrap_or(false);
                            if !titled {
                                errors.push(ValidationError::new(
                                    &path.index(index),
                                    "{name} is invalid project",
                                ));
                            }
                        }
                    }
                }
                (value, errors)
            }),
        ),
        ("isadmin", Schema::rules("boolean")),
    ])
}

// =============================================================================
// Profile Scenario
// =============================================================================

/// A payload violating half the schema reports every violation in
/// declaration order and still returns a fully sanitized value.
#[test]
fn test_profile_with_violations_reports_every_error_in_order() {
    let data = json!({
        "name": "Test",
        "slug": "",
        "age": 20,
        "height": 180.2,
        "birthday": "1testing",
        "contact": {
            "email": "testtesting.com",
            "phones": "62372424",
            "addresses": [{ "region": "test" }],
        },
        "projects": [{ "slug": "test" }],
        "isadmin": "false",
    });

    let out = validate(&profile_schema(), data).unwrap();

    assert_eq!(
        out.errors,
        vec![
            err("slug", "{name} is required"),
            err("birthday", "{name} not valid datetime"),
            err("contact.email", "{name} not valid email"),
            err("contact.phones", "{name} should be a list"),
            err("contact.addresses.0.building", "{name} is required"),
            err("projects.0", "{name} is invalid project"),
        ]
    );

    assert_eq!(
        out.value,
        json!({
            "name": "Test",
            "slug": "",
            "age": 20,
            "height": 180.2,
            "birthday": "1testing",
            "contact": {
                "email": "testtesting.com",
                "phones": "62372424",
                "addresses": [{ "region": "test", "building": null }],
            },
            "projects": [{ "slug": "test" }],
            "isadmin": false,
        })
    );
}

/// A clean payload comes back coerced where the schema coerces and
/// untouched everywhere else.
#[test]
fn test_profile_with_clean_payload_sanitizes_without_errors() {
    let data = json!({
        "name": "Test",
        "slug": "name-test",
        "age": "20",
        "height": "180.2",
        "birthday": "1922-01-23",
        "contact": {
            "email": "test@testing.com",
            "phones": ["+12398930343"],
            "addresses": [{ "region": "test", "building": "test" }],
        },
        "projects": [{ "title": "test" }],
        "isadmin": "false",
    });

    let out = validate(&profile_schema(), data).unwrap();

    assert_eq!(out.errors, vec![]);
    assert_eq!(
        out.value,
        json!({
            "name": "Test",
            "slug": "name-test",
            "age": 20,
            "height": 180.2,
            "birthday": "1922-01-23",
            "contact": {
                "email": "test@testing.com",
                "phones": ["+12398930343"],
                "addresses": [{ "region": "test", "building": "test" }],
            },
            "projects": [{ "title": "test" }],
            "isadmin": false,
        })
    );
}

// =============================================================================
// Compact Scenario
// =============================================================================

/// A custom rule owns its subtree: here it treats an empty list as a
/// missing value, which the item-schema shorthand cannot express.
#[test]
fn test_custom_list_rule_flags_an_empty_list() {
    let schema = Schema::fields([
        ("name", Schema::rules("required")),
        (
            "tags",
            Schema::custom(|path, value, _root| {
                let mut errors = Vec::new();
                if !value.is_array() {
                    errors.push(ValidationError::new(path, "{name} should be a list"));
                } else if raw::is_empty(&value) {
                    errors.push(ValidationError::new(path, "{name} is required"));
                }
                (value, errors)
            }),
        ),
        ("meta", Schema::fields([("age", "required|integer")])),
    ]);

    let out = validate(&schema, json!({ "name": "", "tags": [], "meta": { "age": "7" } })).unwrap();

    assert_eq!(
        out.errors,
        vec![err("name", "{name} is required"), err("tags", "{name} is required")]
    );
    assert_eq!(out.value, json!({ "name": "", "tags": [], "meta": { "age": 7 } }));
}

/// The item-schema shorthand applies per element, so an empty list has
/// nothing to check and elementwise rules fire only where elements exist.
#[test]
fn test_item_schema_checks_elements_not_the_list() {
    let schema = Schema::fields([("tags", Schema::items("required"))]);

    let out = validate(&schema, json!({ "tags": [] })).unwrap();
    assert_eq!(out.errors, vec![]);
    assert_eq!(out.value, json!({ "tags": [] }));

    let out = validate(&schema, json!({ "tags": ["a", ""] })).unwrap();
    assert_eq!(out.errors, vec![err("tags.1", "{name} is required")]);
}

// =============================================================================
// JSON-Authored Schema
// =============================================================================

/// Schemas loaded from a JSON document behave exactly like built ones,
/// tagged forms included.
#[test]
fn test_json_document_schema_drives_validation() {
    let document = json!({
        "username": "required|slug",
        "contact": {
            "email": "required|email",
            "phones": { "_type": "list", "condition": "required", "item": "required|phone" },
        },
    });
    let schema = Schema::from_value(&document).unwrap();

    let out = validate(
        &schema,
        json!({
            "username": "My User",
            "contact": { "email": "user@example.com", "phones": ["+12398930343"] },
        }),
    )
    .unwrap();
    assert_eq!(out.errors, vec![]);
    assert_eq!(
        out.value,
        json!({
            "username": "my-user",
            "contact": { "email": "user@example.com", "phones": ["+12398930343"] },
        })
    );

    let out = validate(
        &schema,
        json!({ "username": "ok", "contact": { "email": "user@example.com" } }),
    )
    .unwrap();
    assert_eq!(
        out.errors,
        vec![
            err("contact.phones", "{name} is required"),
            err("contact.phones", "{name} should be a list"),
        ]
    );
}
