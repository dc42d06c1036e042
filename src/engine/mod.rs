//! Evaluation engine: the recursive walk that applies a normalized schema
//! to a value.
//!
//! # Design Principles
//!
//! - Pure tree walk: no I/O, no shared state, re-entrant by construction
//! - Data errors accumulate; only schema errors abort
//! - Paths are built top-down as the walk descends, never rewritten
//! - The sanitized value is always returned, errors or not

mod evaluator;

pub use evaluator::Validator;
