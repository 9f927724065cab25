//! Wildcard pattern translation.

use regex::{Regex, RegexBuilder};

/// Compiled-size ceiling for wildcard patterns.
///
/// Wildcards are always valid expressions, so only size can reject one.
/// The regex crate default (10 MiB) is too small for very long tokens.
pub const WILDCARD_SIZE_LIMIT: usize = 1 << 30;

/// Translates a wildcard pattern into regular expression source.
///
/// `*` matches any run of characters and `?` exactly one; everything else
/// is literal. The result is unanchored, so it matches anywhere in the text.
pub fn wildcard_pattern(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    let mut literal = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            _ => source.push_str(&regex::escape(ch.encode_utf8(&mut literal))),
        }
    }
    source
}

/// Compiles a wildcard pattern.
///
/// Case-insensitive matching uses simple case folding, so `?` still stands
/// for exactly one character of the original text.
pub fn wildcard_regex(pattern: &str, case_sensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&wildcard_pattern(pattern))
        .case_insensitive(!case_sensitive)
        .size_limit(WILDCARD_SIZE_LIMIT)
        .dfa_size_limit(WILDCARD_SIZE_LIMIT)
        .build()
}
