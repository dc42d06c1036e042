//! Dotted paths locating a value within an input tree.
//!
//! A path is a `.`-joined sequence of segments, where a segment is either an
//! object field name or an unquoted list index: `contact.addresses.0.city`.
//! The root value has the empty path, so the first segment stands alone
//! rather than being prefixed with a separator.

use std::fmt;

/// Location of a value within the tree being validated.
///
/// Paths are built top-down as evaluation descends; rules receive the path
/// of the value they are inspecting and stamp it into the errors they
/// report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(String);

impl Path {
    /// The root path (empty string).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Child path for an object field.
    pub fn field(&self, name: &str) -> Path {
        self.join(name)
    }

    /// Child path for a list element.
    pub fn index(&self, index: usize) -> Path {
        self.join(&index.to_string())
    }

    /// The rendered dotted form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn join(&self, segment: &str) -> Path {
        if self.0.is_empty() {
            Path(segment.to_string())
        } else {
            Path(format!("{}.{}", self.0, segment))
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Path {
    fn from(rendered: &str) -> Self {
        Path(rendered.to_string())
    }
}

impl From<String> for Path {
    fn from(rendered: String) -> Self {
        Path(rendered)
    }
}
