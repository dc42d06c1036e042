//! Schema authoring errors.
//!
//! These indicate programmer mistakes in the schema itself and are raised
//! eagerly as `Err`, before any evaluation happens. Data problems are a
//! different channel entirely: they are collected as
//! [`ValidationError`](crate::report::ValidationError)s while evaluation
//! continues.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Fatal schema authoring errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A JSON schema value that is none of the accepted shapes
    /// (string, array, object).
    #[error("schema syntax error: expected string, array, or object, got {found}")]
    InvalidShape {
        /// JSON type name of the rejected value.
        found: &'static str,
    },
    /// A tagged schema object with an unrecognized `_type` value.
    #[error("schema syntax error: unknown _type tag '{tag}'")]
    UnknownTag {
        /// The rejected tag.
        tag: String,
    },
    /// A tagged schema object whose `condition`, `item`, or `fields` key
    /// carries the wrong JSON type.
    #[error("schema syntax error: malformed '{key}' in tagged schema object")]
    MalformedTag {
        /// The offending key.
        key: &'static str,
    },
    /// An object schema declaring the same field name twice. Fields form a
    /// keyed mapping; a repeated name has no slot of its own.
    #[error("schema syntax error: duplicate field '{name}' in object schema")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },
    /// A condition chain containing an empty rule name, e.g. `"required||email"`.
    #[error("schema syntax error: blank rule name in condition '{condition}'")]
    BlankRuleName {
        /// The full condition string as authored.
        condition: String,
    },
    /// A rule name with no implementation in the registry.
    #[error("unknown validation rule '{name}'")]
    UnknownRule {
        /// The unresolved rule name.
        name: String,
    },
}
