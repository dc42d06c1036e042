//! Rule registry: the name-to-function mapping the engine dispatches on.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{builtin, format};
use crate::path::Path;
use crate::report::ValidationError;
use crate::schema::{Condition, SchemaError, SchemaNode, SchemaResult};

/// A registered rule: `(path, value, argument) -> (value, errors)`.
///
/// Rules are total. They own the incoming value and return its replacement,
/// reporting data problems as errors rather than failing.
pub type RuleFn =
    Arc<dyn Fn(&Path, Value, Option<&str>) -> (Value, Vec<ValidationError>) + Send + Sync>;

/// Named rule set consulted during evaluation.
///
/// The registry is the engine's whole configuration surface: build one,
/// register any project-specific rules, and hand it to a
/// [`Validator`](crate::engine::Validator). Cloning is cheap (rules are
/// shared behind [`Arc`]) and a built registry is immutable in practice,
/// so one registry may back many concurrent validations.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
}

impl RuleRegistry {
    /// An empty registry with no rules at all.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The minimal core set: `required`, `in`, `integer`, `float`,
    /// `boolean`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("required", builtin::required);
        registry.register("in", builtin::one_of);
        registry.register("integer", builtin::integer);
        registry.register("float", builtin::float);
        registry.register("boolean", builtin::boolean);
        registry
    }

    /// The core set plus the format rules: `email`, `phone`, `slug`,
    /// `datetime`.
    pub fn full() -> Self {
        let mut registry = Self::builtin();
        registry.register("email", format::email);
        registry.register("phone", format::phone);
        registry.register("slug", format::slug);
        registry.register("datetime", format::datetime);
        registry
    }

    /// Registers a rule under `name`, replacing any existing rule with
    /// that name.
    pub fn register<F>(&mut self, name: impl Into<String>, rule: F)
    where
        F: Fn(&Path, Value, Option<&str>) -> (Value, Vec<ValidationError>) + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    /// Looks up a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name)
    }

    /// True when a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Checks that every rule a normalized schema invokes is registered.
    ///
    /// Runs before evaluation so an unknown rule name is a fatal schema
    /// error instead of a silently skipped check.
    pub fn verify(&self, node: &SchemaNode) -> SchemaResult<()> {
        match node {
            SchemaNode::Scalar { condition } => self.verify_condition(condition),
            SchemaNode::List { condition, item } => {
                self.verify_condition(condition)?;
                self.verify(item)
            }
            SchemaNode::Object { condition, fields } => {
                self.verify_condition(condition)?;
                for (_, field) in fields {
                    self.verify(field)?;
                }
                Ok(())
            }
            SchemaNode::Custom { .. } => Ok(()),
        }
    }

    fn verify_condition(&self, condition: &Condition) -> SchemaResult<()> {
        for invocation in condition.invocations() {
            if !self.contains(&invocation.name) {
                return Err(SchemaError::UnknownRule {
                    name: invocation.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for RuleRegistry {
    /// The [`full`](Self::full) registry.
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
