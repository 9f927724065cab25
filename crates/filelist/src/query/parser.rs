//! Query tokenizer and per-token resolution.

use super::expression::QueryField;

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Splits a query on whitespace outside quoted spans.
///
/// Both `"` and `'` open a span that only the same character closes; the
/// quote characters themselves are dropped. An unterminated span runs to the
/// end of the input.
pub fn tokenize_query(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        if matches!(ch, '"' | '\'') {
            match quote {
                None => {
                    quote = Some(ch);
                    continue;
                }
                Some(open) if open == ch => {
                    quote = None;
                    continue;
                }
                Some(_) => {}
            }
        }

        if quote.is_none() && ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

// ---------------------------------------------------------------------------
// Token resolution
// ---------------------------------------------------------------------------

/// A token after negation and field prefixes have been stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken<'a> {
    pub negate: bool,
    pub field: QueryField,
    pub pattern: &'a str,
}

/// Resolves negation and field scope; returns `None` for empty remainders.
pub fn resolve_token(raw: &str) -> Option<ResolvedToken<'_>> {
    let (negate, rest) = match raw.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if rest.is_empty() {
        return None;
    }

    let (field, pattern) = QueryField::split_prefix(rest);
    if pattern.is_empty() {
        return None;
    }

    Some(ResolvedToken {
        negate,
        field,
        pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize_query("  foo\tbar  baz "), vec!["foo", "bar", "baz"]);
        assert!(tokenize_query("   ").is_empty());
    }

    #[test]
    fn quoted_spans_keep_whitespace_and_drop_quotes() {
        assert_eq!(
            tokenize_query("\"program files\" 'my docs' x"),
            vec!["program files", "my docs", "x"]
        );
        assert_eq!(tokenize_query("path:\"a b\"c"), vec!["path:a bc"]);
    }

    #[test]
    fn other_quote_kind_is_literal_inside_span() {
        assert_eq!(tokenize_query("\"it's here\""), vec!["it's here"]);
        assert_eq!(tokenize_query("'say \"hi\"'"), vec!["say \"hi\""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(tokenize_query("a \"b c"), vec!["a", "b c"]);
    }

    #[test]
    fn empty_quotes_produce_no_token() {
        assert_eq!(tokenize_query("a \"\" b"), vec!["a", "b"]);
    }

    #[test]
    fn resolves_negation_and_field() {
        assert_eq!(
            resolve_token("!file:foo"),
            Some(ResolvedToken {
                negate: true,
                field: QueryField::FileName,
                pattern: "foo",
            })
        );
        assert_eq!(
            resolve_token("PATH:/etc"),
            Some(ResolvedToken {
                negate: false,
                field: QueryField::Path,
                pattern: "/etc",
            })
        );
    }

    #[test]
    fn only_one_bang_is_stripped() {
        let resolved = resolve_token("!!x").expect("token");
        assert!(resolved.negate);
        assert_eq!(resolved.pattern, "!x");
    }

    #[test]
    fn empty_remainders_are_dropped() {
        assert_eq!(resolve_token("!"), None);
        assert_eq!(resolve_token("file:"), None);
        assert_eq!(resolve_token("!path:"), None);
    }
}
