//! Schema subsystem: authoring forms, canonicalization, and schema errors.
//!
//! Schemas are declarative descriptions of expected shape. Authors write
//! the convenient [`Schema`] shorthands (or JSON documents); [`normalize`]
//! turns them into the canonical [`SchemaNode`] tree the engine walks.
//!
//! # Design Principles
//!
//! - Shorthand and explicit forms normalize to one canonical type
//! - Condition strings parse once, at normalization time
//! - Schema syntax errors are fatal and never mix with data errors
//! - Normalized trees are immutable and reusable across validations

mod errors;
mod normalize;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use normalize::normalize;
pub use types::{Condition, CustomRule, RuleInvocation, Schema, SchemaNode};
