//! Query compilation and matching for export records.
//!
//! This module provides the query language, including:
//! - Whitespace tokenization with single/double quoted spans
//! - `!` negation and `file:` / `path:` field scoping per token
//! - Wildcard (`*`, `?`) or verbatim regular expression patterns
//! - Conjunctive matching of the compiled plan against records

mod expression;
mod matcher;
mod parser;
mod text_match;

// Re-export public types
pub use expression::{QueryField, QueryTerm};
pub use matcher::{QueryOptions, QueryPlan};
pub use parser::tokenize_query;
pub use text_match::{wildcard_pattern, wildcard_regex};
