//! Validation report types.
//!
//! Data problems are never fatal: they are collected as [`ValidationError`]
//! values while evaluation continues, and the caller always receives both
//! the best-effort sanitized value and the full error list.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::Path;

/// A single data problem found during validation.
///
/// Plain value with no identity beyond its fields: two errors are equal iff
/// path and message are equal. The message keeps its `{name}` placeholder;
/// interpolation is a presentation concern and never happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted location of the offending value; empty for the root.
    pub path: String,
    /// Message template, e.g. `"{name} is required"`.
    pub message: String,
}

impl ValidationError {
    /// Creates an error at the given path.
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.as_str().to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of one validation run.
///
/// The sanitized value is returned unconditionally: presence of errors does
/// not withhold it, and callers decide whether to reject, log, or partially
/// trust the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validated {
    /// The sanitized value, intended to replace the original.
    pub value: Value,
    /// Every collected error, in deterministic traversal order.
    pub errors: Vec<ValidationError>,
}

impl Validated {
    /// True when no errors were collected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splits the report into its parts.
    pub fn into_parts(self) -> (Value, Vec<ValidationError>) {
        (self.value, self.errors)
    }
}
