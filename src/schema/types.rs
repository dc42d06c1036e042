//! Schema data model.
//!
//! Two layers:
//! - [`Schema`] is the authoring surface: the shorthands callers write,
//!   freely mixed at any nesting level.
//! - [`SchemaNode`] is the canonical form normalization produces: a closed
//!   sum type with parsed condition chains, which the evaluator dispatches
//!   on by exhaustive match.
//!
//! Nodes are immutable once built. Validation never mutates a schema, so
//! one normalized tree may serve concurrent validations.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use crate::path::Path;
use crate::report::ValidationError;

/// A fully custom validation step owning one schema subtree.
///
/// The closure receives `(path, value, root)`: the untouched subtree value
/// plus the whole root value for cross-field checks. It returns the
/// replacement value and any errors, and the engine passes both through
/// unchanged, with no further rule dispatch below this point.
#[derive(Clone)]
pub struct CustomRule(Arc<CustomFn>);

type CustomFn = dyn Fn(&Path, Value, &Value) -> (Value, Vec<ValidationError>) + Send + Sync;

impl CustomRule {
    /// Wraps a closure as a custom subtree rule.
    pub fn new<F>(rule: F) -> Self
    where
        F: Fn(&Path, Value, &Value) -> (Value, Vec<ValidationError>) + Send + Sync + 'static,
    {
        Self(Arc::new(rule))
    }

    /// Invokes the wrapped closure.
    pub fn call(&self, path: &Path, value: Value, root: &Value) -> (Value, Vec<ValidationError>) {
        (self.0)(path, value, root)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule(..)")
    }
}

// Closures have no structural content to compare; identity of the wrapped
// function is the only meaningful equality, and it is what keeps canonical
// nodes comparable (normalization idempotence is asserted structurally).
impl PartialEq for CustomRule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CustomRule {}

/// One rule application within a condition chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInvocation {
    /// Registry name of the rule.
    pub name: String,
    /// Raw argument after the first `:`, if any. The rule owns any further
    /// parsing (option lists, format strings).
    pub argument: Option<String>,
}

/// An ordered rule chain applied left to right to one schema node.
///
/// Parsed from the authored string at normalization time: segments split on
/// `|`, each segment split on its first `:` into name and argument, so
/// arguments may themselves contain colons (`datetime:%H:%M`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition(Vec<RuleInvocation>);

impl Condition {
    /// The empty chain (accepts anything).
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses an authored condition string.
    ///
    /// The empty string is the empty chain. A blank rule name anywhere in a
    /// non-empty string (`"a||b"`, `"|a"`, `":x"`) is an authoring error.
    pub fn parse(raw: &str) -> SchemaResult<Self> {
        if raw.is_empty() {
            return Ok(Self::none());
        }
        let mut invocations = Vec::new();
        for segment in raw.split('|') {
            let (name, argument) = match segment.split_once(':') {
                Some((name, argument)) => (name, Some(argument.to_string())),
                None => (segment, None),
            };
            if name.is_empty() {
                return Err(SchemaError::BlankRuleName {
                    condition: raw.to_string(),
                });
            }
            invocations.push(RuleInvocation {
                name: name.to_string(),
                argument,
            });
        }
        Ok(Self(invocations))
    }

    /// The invocations in declaration order.
    pub fn invocations(&self) -> &[RuleInvocation] {
        &self.0
    }

    /// True when no rules are attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Declarative schema in authoring form.
///
/// Accepted at any nesting level, freely mixed. [`normalize`] converts every
/// variant into its canonical [`SchemaNode`].
///
/// [`normalize`]: super::normalize
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// Pipe-separated rule chain, e.g. `"required|integer"`.
    Condition(String),
    /// Homogeneous list; the item schema applies to every element.
    Items(Box<Schema>),
    /// Object schema; field declaration order is the error-reporting order.
    Fields(Vec<(String, Schema)>),
    /// Explicit list form carrying a condition chain on the list itself
    /// (e.g. a required, non-empty list of phones).
    List {
        /// Chain applied to the whole list value.
        condition: String,
        /// Schema for every element.
        item: Box<Schema>,
    },
    /// Explicit object form carrying a condition chain on the object itself.
    Object {
        /// Chain applied to the whole object value.
        condition: String,
        /// Declared fields in declaration order.
        fields: Vec<(String, Schema)>,
    },
    /// Already-canonical subtree; normalization passes it through unchanged.
    Node(SchemaNode),
    /// Fully custom subtree handling.
    Custom(CustomRule),
}

impl Schema {
    /// Rule-chain shorthand.
    pub fn rules(condition: impl Into<String>) -> Self {
        Schema::Condition(condition.into())
    }

    /// Accept-anything schema (the empty rule chain).
    pub fn any() -> Self {
        Schema::Condition(String::new())
    }

    /// List shorthand with an item schema.
    pub fn items(item: impl Into<Schema>) -> Self {
        Schema::Items(Box::new(item.into()))
    }

    /// Object shorthand from `(name, schema)` pairs.
    pub fn fields<K, S, I>(fields: I) -> Self
    where
        K: Into<String>,
        S: Into<Schema>,
        I: IntoIterator<Item = (K, S)>,
    {
        Schema::Fields(fields.into_iter().map(|(k, s)| (k.into(), s.into())).collect())
    }

    /// Explicit list form with a condition chain on the list itself.
    pub fn list(condition: impl Into<String>, item: impl Into<Schema>) -> Self {
        Schema::List {
            condition: condition.into(),
            item: Box::new(item.into()),
        }
    }

    /// Explicit object form with a condition chain on the object itself.
    pub fn object<K, S, I>(condition: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        S: Into<Schema>,
        I: IntoIterator<Item = (K, S)>,
    {
        Schema::Object {
            condition: condition.into(),
            fields: fields.into_iter().map(|(k, s)| (k.into(), s.into())).collect(),
        }
    }

    /// Custom subtree rule from a closure.
    pub fn custom<F>(rule: F) -> Self
    where
        F: Fn(&Path, Value, &Value) -> (Value, Vec<ValidationError>) + Send + Sync + 'static,
    {
        Schema::Custom(CustomRule::new(rule))
    }
}

/// Condition strings coerce directly, so the constructor helpers accept
/// literals in place of built schemas: `Schema::items("required|phone")`.
impl From<&str> for Schema {
    fn from(condition: &str) -> Self {
        Schema::Condition(condition.to_string())
    }
}

impl From<String> for Schema {
    fn from(condition: String) -> Self {
        Schema::Condition(condition)
    }
}

/// Canonical schema node.
///
/// Exactly one variant tag per node, decided once at normalization time;
/// the evaluator dispatches purely on that tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Leaf value validated by its condition chain alone.
    Scalar {
        /// Chain applied to the value.
        condition: Condition,
    },
    /// Homogeneous list: one item schema for every element.
    List {
        /// Chain applied to the whole list before descending.
        condition: Condition,
        /// Canonical schema for every element.
        item: Box<SchemaNode>,
    },
    /// Object with a declared field set.
    Object {
        /// Chain applied to the whole object before descending.
        condition: Condition,
        /// Declared fields in declaration order.
        fields: Vec<(String, SchemaNode)>,
    },
    /// Custom subtree handling; bypasses rule dispatch entirely.
    Custom {
        /// The wrapped closure.
        rule: CustomRule,
    },
}

impl SchemaNode {
    /// Variant name for messages and logging.
    pub fn variant_name(&self) -> &'static str {
        match self {
            SchemaNode::Scalar { .. } => "scalar",
            SchemaNode::List { .. } => "list",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Custom { .. } => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_pipes() {
        let condition = Condition::parse("required|integer").unwrap();
        let names: Vec<&str> = condition.invocations().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["required", "integer"]);
        assert!(condition.invocations().iter().all(|i| i.argument.is_none()));
    }

    #[test]
    fn test_parse_splits_argument_on_first_colon_only() {
        let condition = Condition::parse("datetime:%H:%M").unwrap();
        let invocation = &condition.invocations()[0];
        assert_eq!(invocation.name, "datetime");
        assert_eq!(invocation.argument.as_deref(), Some("%H:%M"));
    }

    #[test]
    fn test_parse_keeps_empty_argument() {
        let condition = Condition::parse("in:").unwrap();
        assert_eq!(condition.invocations()[0].argument.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_empty_string_is_empty_chain() {
        let condition = Condition::parse("").unwrap();
        assert!(condition.is_empty());
    }

    #[test]
    fn test_parse_rejects_blank_rule_names() {
        assert!(Condition::parse("required||email").is_err());
        assert!(Condition::parse("|required").is_err());
        assert!(Condition::parse(":arg").is_err());
    }

    #[test]
    fn test_parse_does_not_trim_whitespace() {
        // "required | email" is two authoring mistakes, not two rules.
        let condition = Condition::parse("required | email").unwrap();
        let names: Vec<&str> = condition.invocations().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["required ", " email"]);
    }

    #[test]
    fn test_custom_rule_equality_is_identity() {
        let rule = CustomRule::new(|_, value, _| (value, vec![]));
        let copy = rule.clone();
        let other = CustomRule::new(|_, value, _| (value, vec![]));
        assert_eq!(rule, copy);
        assert_ne!(rule, other);
    }

    #[test]
    fn test_constructor_helpers_build_expected_variants() {
        assert_eq!(Schema::rules("required"), Schema::Condition("required".to_string()));
        assert_eq!(Schema::any(), Schema::Condition(String::new()));

        let list = Schema::list("required", Schema::rules("required|phone"));
        match list {
            Schema::List { condition, item } => {
                assert_eq!(condition, "required");
                assert_eq!(*item, Schema::Condition("required|phone".to_string()));
            }
            other => panic!("expected explicit list, got {:?}", other),
        }

        let object = Schema::fields([("name", Schema::rules("required"))]);
        match object {
            Schema::Fields(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].0, "name");
            }
            other => panic!("expected fields, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_strings_coerce_into_schemas() {
        assert_eq!(Schema::from("required"), Schema::rules("required"));
        assert_eq!(Schema::from("in:a,b".to_string()), Schema::rules("in:a,b"));
        assert_eq!(
            Schema::items("required|phone"),
            Schema::items(Schema::rules("required|phone"))
        );
        assert_eq!(
            Schema::list("required", "required|phone"),
            Schema::list("required", Schema::rules("required|phone"))
        );
        assert_eq!(
            Schema::fields([("name", "required")]),
            Schema::fields([("name", Schema::rules("required"))])
        );
    }
}
