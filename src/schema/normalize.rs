//! Schema normalization and JSON loading.
//!
//! [`normalize`] converts authoring-form [`Schema`] trees into canonical
//! [`SchemaNode`] trees, parsing condition strings along the way.
//! [`Schema::from_value`] loads authoring form from a JSON document, so
//! schemas can live in config files next to the data they validate.

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Condition, Schema, SchemaNode};

/// Normalizes an authored schema into canonical form.
///
/// Shorthand variants expand to their explicit counterparts and condition
/// strings parse into invocation chains. Already-canonical subtrees pass
/// through unchanged, so normalizing a normalized tree is the identity.
/// Object forms must declare each field name once; a repeated name is an
/// authoring error.
pub fn normalize(schema: &Schema) -> SchemaResult<SchemaNode> {
    match schema {
        Schema::Condition(raw) => Ok(SchemaNode::Scalar {
            condition: Condition::parse(raw)?,
        }),
        Schema::Items(item) => Ok(SchemaNode::List {
            condition: Condition::none(),
            item: Box::new(normalize(item)?),
        }),
        Schema::Fields(fields) => Ok(SchemaNode::Object {
            condition: Condition::none(),
            fields: normalize_fields(fields)?,
        }),
        Schema::List { condition, item } => Ok(SchemaNode::List {
            condition: Condition::parse(condition)?,
            item: Box::new(normalize(item)?),
        }),
        Schema::Object { condition, fields } => Ok(SchemaNode::Object {
            condition: Condition::parse(condition)?,
            fields: normalize_fields(fields)?,
        }),
        Schema::Node(node) => Ok(node.clone()),
        Schema::Custom(rule) => Ok(SchemaNode::Custom { rule: rule.clone() }),
    }
}

fn normalize_fields(fields: &[(String, Schema)]) -> SchemaResult<Vec<(String, SchemaNode)>> {
    let mut out = Vec::with_capacity(fields.len());
    for (name, schema) in fields {
        if out.iter().any(|(seen, _)| seen == name) {
            return Err(SchemaError::DuplicateField { name: name.clone() });
        }
        out.push((name.clone(), normalize(schema)?));
    }
    Ok(out)
}

impl Schema {
    /// Loads authoring form from a JSON schema document.
    ///
    /// Strings are condition chains, arrays are list shorthands taking the
    /// first element as the item schema (an empty array accepts any
    /// elements), and objects are field maps in document order. An object
    /// carrying a `"_type"` tag is read as the explicit form instead, so
    /// list and object conditions can be written in JSON too.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        match value {
            Value::String(condition) => Ok(Schema::Condition(condition.clone())),
            Value::Array(items) => match items.first() {
                Some(item) => Ok(Schema::items(Schema::from_value(item)?)),
                None => Ok(Schema::items(Schema::any())),
            },
            Value::Object(map) if map.contains_key("_type") => from_tagged(map),
            Value::Object(map) => {
                let mut fields = Vec::with_capacity(map.len());
                for (name, schema) in map {
                    fields.push((name.clone(), Schema::from_value(schema)?));
                }
                Ok(Schema::Fields(fields))
            }
            other => Err(SchemaError::InvalidShape {
                found: json_type_name(other),
            }),
        }
    }
}

fn from_tagged(map: &serde_json::Map<String, Value>) -> SchemaResult<Schema> {
    let tag = match map.get("_type") {
        Some(Value::String(tag)) => tag.as_str(),
        _ => return Err(SchemaError::MalformedTag { key: "_type" }),
    };
    let condition = match map.get("condition") {
        None => String::new(),
        Some(Value::String(condition)) => condition.clone(),
        Some(_) => return Err(SchemaError::MalformedTag { key: "condition" }),
    };
    match tag {
        "scalar" => Ok(Schema::Condition(condition)),
        "list" => {
            let item = map
                .get("item")
                .ok_or(SchemaError::MalformedTag { key: "item" })?;
            Ok(Schema::List {
                condition,
                item: Box::new(Schema::from_value(item)?),
            })
        }
        "object" => {
            let fields = match map.get("fields") {
                Some(Value::Object(fields)) => fields,
                _ => return Err(SchemaError::MalformedTag { key: "fields" }),
            };
            let mut pairs = Vec::with_capacity(fields.len());
            for (name, schema) in fields {
                pairs.push((name.clone(), Schema::from_value(schema)?));
            }
            Ok(Schema::Object {
                condition,
                fields: pairs,
            })
        }
        other => Err(SchemaError::UnknownTag {
            tag: other.to_string(),
        }),
    }
}

/// JSON type name for schema syntax messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
