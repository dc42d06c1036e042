//! Rule subsystem: the registry, the built-in rule set, and the raw
//! predicates and transforms rules are built on.
//!
//! # Design Principles
//!
//! - Rules are total functions: errors are reported, never raised
//! - Gated rules skip empty values; coercive rules always run
//! - The registry is explicit configuration, with no global state
//! - Raw helpers stay public so custom rules share one emptiness and
//!   coercion vocabulary

mod builtin;
mod format;
mod registry;

pub mod raw;

pub use registry::{RuleFn, RuleRegistry};
