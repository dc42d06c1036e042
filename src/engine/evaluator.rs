//! Recursive schema evaluation.
//!
//! The walk is a pure function of (schema, value): no I/O, no shared
//! state, no mutation of caller data. Each step returns a replacement
//! value for its subtree and the errors found there; callers compose the
//! replacements into a fresh container, so the input is never written to.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::path::Path;
use crate::report::{Validated, ValidationError};
use crate::rules::RuleRegistry;
use crate::schema::{normalize, Condition, Schema, SchemaNode, SchemaResult};

/// Schema evaluation engine.
///
/// Holds the rule registry consulted during the walk. A validator is
/// immutable and cheap to clone; one instance may serve concurrent
/// validations.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
}

impl Validator {
    /// Creates a validator over the given registry.
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator dispatches on.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates `value` against an authored schema.
    ///
    /// Normalizes the schema, checks every invoked rule is registered,
    /// then walks the value. Schema problems (bad shape, blank or unknown
    /// rule names) are fatal and surface as `Err`; data problems are never
    /// fatal and come back inside [`Validated`] alongside the best-effort
    /// sanitized value.
    pub fn validate(&self, schema: &Schema, value: Value) -> SchemaResult<Validated> {
        let node = normalize(schema)?;
        self.validate_node(&node, value)
    }

    /// Validates `value` against an already-normalized schema node.
    ///
    /// Lets callers normalize once and reuse the canonical tree across
    /// many validations.
    pub fn validate_node(&self, node: &SchemaNode, value: Value) -> SchemaResult<Validated> {
        self.registry.verify(node)?;
        let root = value.clone();
        let (value, errors) = self.evaluate(node, value, &Path::root(), &root);
        debug!(errors = errors.len(), "validation finished");
        Ok(Validated { value, errors })
    }

    /// Evaluates one subtree: the raw recursion step under
    /// [`validate`](Self::validate).
    ///
    /// Infallible and pure. Callers supply the subtree's path and the root
    /// value rules may consult for cross-field context; `validate` passes
    /// the root path and the input itself. Rule names are not re-checked
    /// here, so unknown names are silently skipped unless
    /// [`RuleRegistry::verify`] ran first.
    pub fn evaluate(
        &self,
        node: &SchemaNode,
        value: Value,
        path: &Path,
        root: &Value,
    ) -> (Value, Vec<ValidationError>) {
        match node {
            SchemaNode::Scalar { condition } => self.apply_chain(condition, path, value),
            SchemaNode::List { condition, item } => {
                self.evaluate_list(condition, item, path, value, root)
            }
            SchemaNode::Object { condition, fields } => {
                self.evaluate_object(condition, fields, path, value, root)
            }
            SchemaNode::Custom { rule } => rule.call(path, value, root),
        }
    }

    /// Runs a condition chain left to right, threading each rule's
    /// replacement value into the next. Never short-circuits: later rules
    /// still run after an earlier one errored, because sanitization is
    /// best-effort.
    fn apply_chain(
        &self,
        condition: &Condition,
        path: &Path,
        mut value: Value,
    ) -> (Value, Vec<ValidationError>) {
        let mut errors = Vec::new();
        for invocation in condition.invocations() {
            // Unknown names are rejected by `verify` before the walk starts.
            let Some(rule) = self.registry.get(&invocation.name) else {
                continue;
            };
            let (replacement, mut rule_errors) =
                rule(path, value, invocation.argument.as_deref());
            value = replacement;
            errors.append(&mut rule_errors);
        }
        (value, errors)
    }

    /// The list chain runs first so list-level rules see the whole value
    /// (a `required` list reports emptiness before any shape complaint).
    /// The shape check then applies to the chain's output.
    fn evaluate_list(
        &self,
        condition: &Condition,
        item: &SchemaNode,
        path: &Path,
        value: Value,
        root: &Value,
    ) -> (Value, Vec<ValidationError>) {
        let (value, mut errors) = self.apply_chain(condition, path, value);
        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                trace!(path = %path, "value is not a list");
                errors.push(ValidationError::new(path, "{name} should be a list"));
                return (other, errors);
            }
        };
        let mut sanitized = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let (element, mut element_errors) =
                self.evaluate(item, element, &path.index(index), root);
            errors.append(&mut element_errors);
            sanitized.push(element);
        }
        (Value::Array(sanitized), errors)
    }

    /// Objects evaluate every declared field in declaration order; a
    /// missing key evaluates as null so only a `required` rule can flag
    /// absence. The output holds exactly the declared field set, dropping
    /// anything undeclared from the input.
    fn evaluate_object(
        &self,
        condition: &Condition,
        fields: &[(String, SchemaNode)],
        path: &Path,
        value: Value,
        root: &Value,
    ) -> (Value, Vec<ValidationError>) {
        let (value, mut errors) = self.apply_chain(condition, path, value);
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                trace!(path = %path, "value is not an object");
                errors.push(ValidationError::new(path, "{name} is invalid"));
                return (other, errors);
            }
        };
        let mut sanitized = Map::with_capacity(fields.len());
        for (name, field) in fields {
            let field_value = map.remove(name).unwrap_or(Value::Null);
            let (field_value, mut field_errors) =
                self.evaluate(field, field_value, &path.field(name), root);
            errors.append(&mut field_errors);
            sanitized.insert(name.clone(), field_value);
        }
        (Value::Object(sanitized), errors)
    }
}

impl Default for Validator {
    /// A validator over [`RuleRegistry::full`].
    fn default() -> Self {
        Self::new(RuleRegistry::full())
    }
}
