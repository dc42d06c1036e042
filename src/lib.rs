//! scrub - schema-driven validation and sanitization for JSON-like values
//!
//! A declarative schema describes the expected shape of a value. The engine
//! recursively walks the value, applies named rules at each node, coerces
//! toward canonical types, and collects every problem as a
//! [`ValidationError`] carrying a dotted path. The sanitized value always
//! comes back, errors or not; callers decide what to do with an imperfect
//! one.
//!
//! ```
//! use scrub::{validate, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::fields([("name", "required"), ("age", "required|integer")]);
//! let out = validate(&schema, json!({ "name": "", "age": "20" }))?;
//! assert_eq!(out.errors[0].path, "name");
//! assert_eq!(out.value, json!({ "name": "", "age": 20 }));
//! # Ok::<(), scrub::SchemaError>(())
//! ```

pub mod engine;
pub mod path;
pub mod report;
pub mod rules;
pub mod schema;

pub use engine::Validator;
pub use path::Path;
pub use report::{Validated, ValidationError};
pub use rules::{RuleFn, RuleRegistry};
pub use schema::{
    normalize, Condition, CustomRule, RuleInvocation, Schema, SchemaError, SchemaNode,
    SchemaResult,
};

use serde_json::Value;

/// Validates `value` against an authored schema with the full rule set.
///
/// Convenience for [`Validator::validate`] over [`RuleRegistry::full`];
/// build a [`Validator`] directly to use a custom registry.
pub fn validate(schema: &Schema, value: Value) -> SchemaResult<Validated> {
    Validator::default().validate(schema, value)
}
