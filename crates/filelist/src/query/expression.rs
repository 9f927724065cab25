//! Compiled query terms.

use regex::Regex;

use crate::record::Record;

/// The record field a term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryField {
    /// Path, file name, and attribute text combined.
    #[default]
    All,
    FileName,
    Path,
}

impl QueryField {
    /// Strips a case-insensitive `file:` or `path:` prefix from a token.
    pub fn split_prefix(token: &str) -> (Self, &str) {
        for (prefix, field) in [("file:", Self::FileName), ("path:", Self::Path)] {
            if token.len() >= prefix.len()
                && token.is_char_boundary(prefix.len())
                && token[..prefix.len()].eq_ignore_ascii_case(prefix)
            {
                return (field, &token[prefix.len()..]);
            }
        }
        (Self::All, token)
    }

    /// Returns the text of this field.
    pub(crate) fn text_of(self, record: &Record) -> &str {
        match self {
            Self::All => record.search_text(),
            Self::FileName => record.file_name(),
            Self::Path => record.path(),
        }
    }
}

/// A single compiled predicate.
#[derive(Debug, Clone)]
pub struct QueryTerm {
    negate: bool,
    field: QueryField,
    /// Case sensitivity is compiled into the expression.
    matcher: Regex,
}

impl QueryTerm {
    pub(crate) fn new(negate: bool, field: QueryField, matcher: Regex) -> Self {
        Self {
            negate,
            field,
            matcher,
        }
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    pub fn field(&self) -> QueryField {
        self.field
    }

    /// The compiled pattern source.
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Returns true if the record satisfies this term.
    pub fn matches(&self, record: &Record) -> bool {
        let target = self.field.text_of(record);
        self.matcher.is_match(target) != self.negate
    }
}
