//! Query plan compilation and matching.

use std::time::Instant;

use regex::RegexBuilder;

use crate::error::QueryError;
use crate::record::Record;

use super::expression::{QueryField, QueryTerm};
use super::parser::{resolve_token, tokenize_query};
use super::text_match::wildcard_regex;

/// Flags that control how query tokens become patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    /// Use tokens verbatim as regular expressions instead of wildcards.
    pub regex: bool,
    pub case_sensitive: bool,
}

/// A compiled query: every term must hold for a record to match.
#[derive(Debug, Clone, Default)]
pub struct QueryPlan {
    terms: Vec<QueryTerm>,
}

impl QueryPlan {
    /// A plan with no terms; it matches every record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compiles a raw query string into a plan.
    ///
    /// The compilation pipeline:
    /// 1. Tokenize on whitespace outside quoted spans
    /// 2. Strip `!` and `file:` / `path:` from each token, dropping empty ones
    /// 3. Compile each remaining token to a pattern
    ///
    /// In regex mode an invalid expression fails the whole plan.
    pub fn compile(query: &str, options: QueryOptions) -> Result<Self, QueryError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let started = Instant::now();
        let mut terms = Vec::new();
        for token in tokenize_query(trimmed) {
            let Some(resolved) = resolve_token(&token) else {
                continue;
            };
            terms.push(compile_term(
                resolved.negate,
                resolved.field,
                resolved.pattern,
                options,
            )?);
        }

        log::debug!(
            "query compiled terms={} regex={} case_sensitive={} elapsed_us={}",
            terms.len(),
            options.regex,
            options.case_sensitive,
            started.elapsed().as_micros(),
        );
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[QueryTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if the record satisfies every term.
    pub fn matches(&self, record: &Record) -> bool {
        self.terms.iter().all(|term| term.matches(record))
    }
}

fn compile_term(
    negate: bool,
    field: QueryField,
    pattern: &str,
    options: QueryOptions,
) -> Result<QueryTerm, QueryError> {
    if options.regex {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|error| QueryError::InvalidRegex {
                pattern: pattern.to_string(),
                message: error.to_string(),
            })?;
        return Ok(QueryTerm::new(negate, field, matcher));
    }

    let matcher = wildcard_regex(pattern, options.case_sensitive).map_err(|error| match error {
        regex::Error::CompiledTooBig(_) => QueryError::PatternTooLarge {
            length: pattern.chars().count(),
        },
        other => QueryError::InvalidRegex {
            pattern: pattern.to_string(),
            message: other.to_string(),
        },
    })?;
    Ok(QueryTerm::new(negate, field, matcher))
}
