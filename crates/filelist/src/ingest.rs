//! Export ingestion: delimited text to typed records.
//!
//! The export is a five-column CSV (`Path, Size, Date Modified, Date Created,
//! Attributes`) with a header row. Parsing is tolerant:
//! - Rows with fewer than five fields are dropped individually
//! - Unparsable numeric fields become absent values, never errors
//! - Empty or header-only input yields an empty record set

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use std::time::Instant;

use crate::error::{ListingError, Result};
use crate::record::{Record, RecordSet};

/// Number of columns a row needs to become a record.
pub const EXPORT_COLUMN_COUNT: usize = 5;

/// Parses raw export text into a record set.
pub fn ingest(raw_text: &str) -> RecordSet {
    let started = Instant::now();
    let mut records = Vec::new();
    let mut dropped = 0usize;

    // The first row is the header.
    for row in ExportRows::new(raw_text).skip(1) {
        if row.len() < EXPORT_COLUMN_COUNT {
            dropped += 1;
            continue;
        }
        records.push(Record::from_columns(
            &row[0], &row[1], &row[2], &row[3], &row[4],
        ));
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} export rows with fewer than {EXPORT_COLUMN_COUNT} fields");
    }
    log::info!(
        "export ingested records={} dropped_rows={} bytes={} elapsed_ms={}",
        records.len(),
        dropped,
        raw_text.len(),
        started.elapsed().as_millis(),
    );

    RecordSet::new(records)
}

// ---------------------------------------------------------------------------
// Row scanner
// ---------------------------------------------------------------------------

/// Splits export text into rows of fields.
///
/// Every `"` opens or closes a quoted span, wherever it appears in a field,
/// and the quote itself is dropped. Inside a span `""` is a literal quote
/// and `,`, `\r`, `\n` are literal. Outside a span `,` ends a field and
/// `\n`, `\r\n`, or a lone `\r` ends a row. A final row without a
/// terminator is still produced.
#[derive(Debug, Clone)]
pub struct ExportRows<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> ExportRows<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }
}

impl Iterator for ExportRows<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        let mut fields = Vec::new();
        let mut value = String::new();
        let mut quoted = false;

        while let Some(ch) = self.chars.next() {
            match ch {
                '"' if quoted && self.chars.peek() == Some(&'"') => {
                    self.chars.next();
                    value.push('"');
                }
                '"' => quoted = !quoted,
                '\r' | '\n' if !quoted => {
                    if ch == '\r' && self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    fields.push(value);
                    return Some(fields);
                }
                ',' if !quoted => fields.push(std::mem::take(&mut value)),
                _ => value.push(ch),
            }
        }

        if value.is_empty() && fields.is_empty() {
            return None;
        }
        fields.push(value);
        Some(fields)
    }
}

/// Reads an export from disk and ingests it.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn ingest_file(path: &Path) -> Result<RecordSet> {
    let bytes = std::fs::read(path).map_err(|source| ListingError::ExportRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(ingest(&text))
}

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

/// Parses a size or timestamp column as a non-negative integer.
///
/// Accepts decimal with an optional sign and unsigned `0x`/`0o`/`0b`
/// literals. Empty, negative, fractional, or overflowing values are absent.
pub fn parse_unsigned_integer(raw: &str) -> Option<u128> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return Some(value);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let value = digits.parse::<u128>().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Parses an unsigned `0x`, `0o`, or `0b` prefixed literal.
pub(crate) fn parse_radix_literal(raw: &str) -> Option<u128> {
    let bytes = raw.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &raw[2..];
    if !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }
    u128::from_str_radix(digits, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Filename,Size,Date Modified,Date Created,Attributes\n";

    #[test]
    fn header_only_input_is_empty() {
        assert!(ingest("").is_empty());
        assert!(ingest(HEADER).is_empty());
    }

    #[test]
    fn rows_keep_file_order() {
        let text = format!("{HEADER}C:\\b.txt,2,,,32\nC:\\a.txt,1,,,32\n");
        let records = ingest(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path(), "C:\\b.txt");
        assert_eq!(records[1].path(), "C:\\a.txt");
    }

    #[test]
    fn short_rows_are_dropped() {
        let text = format!("{HEADER}only,three,fields\nC:\\ok.txt,1,2,3,32\n\n");
        let records = ingest(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name(), "ok.txt");
    }

    #[test]
    fn quoted_fields_keep_separators_and_quotes() {
        let text = format!(
            "{HEADER}\"C:\\dir, with comma\\say \"\"hi\"\".txt\",10,,,32\r\n\"multi\nline\",1,,,0"
        );
        let records = ingest(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path(), "C:\\dir, with comma\\say \"hi\".txt");
        assert_eq!(records[0].file_name(), "say \"hi\".txt");
        assert_eq!(records[1].path(), "multi\nline");
    }

    #[test]
    fn quotes_toggle_anywhere_in_a_field() {
        let text = format!("{HEADER}C:\\a\"b,c\"d.txt,5,,,32\n");
        let records = ingest(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path(), "C:\\ab,cd.txt");
        assert_eq!(records[0].size(), Some(5));
        assert_eq!(records[0].attributes_raw(), "32");
    }

    #[test]
    fn doubled_quote_outside_a_span_is_empty() {
        let rows = ExportRows::new("a\"\"b,c").collect::<Vec<_>>();
        assert_eq!(rows, vec![vec!["ab".to_string(), "c".to_string()]]);
    }

    #[test]
    fn lone_carriage_returns_end_rows() {
        let text = "h1,h2,h3,h4,h5\ra,1,,,0\rb,2,,,0";
        let records = ingest(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path(), "a");
        assert_eq!(records[1].size(), Some(2));
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_input() {
        let rows = ExportRows::new("\"a,b\nc").collect::<Vec<_>>();
        assert_eq!(rows, vec![vec!["a,b\nc".to_string()]]);
    }

    #[test]
    fn blank_lines_become_single_empty_fields() {
        let rows = ExportRows::new("a,b\n\nc").collect::<Vec<_>>();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![String::new()]);
        assert!(ExportRows::new("").next().is_none());
    }

    #[test]
    fn trailing_row_without_terminator_is_emitted() {
        let text = format!("{HEADER}a,1,2,3,4");
        assert_eq!(ingest(&text).len(), 1);
    }

    #[test]
    fn crlf_rows_are_split() {
        let text = "h1,h2,h3,h4,h5\r\na,1,,,0\r\nb,2,,,0\r\n";
        let records = ingest(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].size(), Some(2));
    }

    #[test]
    fn numeric_columns_parse_losslessly() {
        assert_eq!(parse_unsigned_integer(" 42 "), Some(42));
        assert_eq!(
            parse_unsigned_integer("123456789012345678901234567890"),
            Some(123_456_789_012_345_678_901_234_567_890)
        );
        assert_eq!(parse_unsigned_integer("+7"), Some(7));
        assert_eq!(parse_unsigned_integer("-0"), Some(0));
        assert_eq!(parse_unsigned_integer("0x1F"), Some(31));
        assert_eq!(parse_unsigned_integer("0b101"), Some(5));
    }

    #[test]
    fn invalid_numeric_columns_are_absent() {
        assert_eq!(parse_unsigned_integer(""), None);
        assert_eq!(parse_unsigned_integer("   "), None);
        assert_eq!(parse_unsigned_integer("-1"), None);
        assert_eq!(parse_unsigned_integer("1.5"), None);
        assert_eq!(parse_unsigned_integer("12abc"), None);
        assert_eq!(parse_unsigned_integer("-0x10"), None);
        assert_eq!(parse_unsigned_integer("0x"), None);
        assert_eq!(parse_unsigned_integer("+"), None);
    }

    #[test]
    fn missing_export_file_reports_path() {
        let error = ingest_file(Path::new("/nonexistent/export.efu")).unwrap_err();
        assert!(matches!(error, ListingError::ExportRead { .. }));
        assert!(error.to_string().contains("/nonexistent/export.efu"));
    }

    #[test]
    fn export_file_is_read_from_disk() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("listing.efu");
        std::fs::write(&path, format!("{HEADER}C:\\x.bin,5,,,32\n")).expect("write export");
        let records = ingest_file(&path).expect("ingest");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].size(), Some(5));
    }
}
