//! File attribute bitmask decoding.
//!
//! The export carries the Windows `FILE_ATTRIBUTE_*` bitmask as a decimal
//! number. Decoding is a pure function over a fixed, ordered table.

use bitflags::bitflags;

bitflags! {
    /// Windows file attribute bits understood by the decoder.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileAttributes: u32 {
        const READ_ONLY = 0x0001;
        const HIDDEN = 0x0002;
        const SYSTEM = 0x0004;
        const VOLUME_LABEL = 0x0008;
        const DIRECTORY = 0x0010;
        const ARCHIVE = 0x0020;
        const DEVICE = 0x0040;
        const NORMAL = 0x0080;
        const TEMPORARY = 0x0100;
        const SPARSE_FILE = 0x0200;
        const REPARSE_POINT = 0x0400;
        const COMPRESSED = 0x0800;
        const OFFLINE = 0x1000;
        const ENCRYPTED = 0x4000;
        const INTEGRITY_STREAM = 0x8000;
        const VIRTUAL = 0x10000;
        const NO_SCRUB_DATA = 0x20000;
        const EXTENDED_ATTRIBUTES = 0x40000;
        const PINNED = 0x80000;
        const UNPINNED = 0x100000;
        const RECALL_ON_OPEN = 0x200000;
        const RECALL_ON_DATA_ACCESS = 0x400000;
    }
}

/// Label table in display order.
pub const ATTRIBUTE_LABELS: [(FileAttributes, &str); 22] = [
    (FileAttributes::READ_ONLY, "Read-only"),
    (FileAttributes::HIDDEN, "Hidden"),
    (FileAttributes::SYSTEM, "System"),
    (FileAttributes::VOLUME_LABEL, "Volume label"),
    (FileAttributes::DIRECTORY, "Directory"),
    (FileAttributes::ARCHIVE, "Archive"),
    (FileAttributes::DEVICE, "Device"),
    (FileAttributes::NORMAL, "Normal"),
    (FileAttributes::TEMPORARY, "Temporary"),
    (FileAttributes::SPARSE_FILE, "Sparse file"),
    (FileAttributes::REPARSE_POINT, "Reparse point"),
    (FileAttributes::COMPRESSED, "Compressed"),
    (FileAttributes::OFFLINE, "Offline"),
    (FileAttributes::ENCRYPTED, "Encrypted"),
    (FileAttributes::INTEGRITY_STREAM, "Integrity stream"),
    (FileAttributes::VIRTUAL, "Virtual"),
    (FileAttributes::NO_SCRUB_DATA, "No scrub data"),
    (FileAttributes::EXTENDED_ATTRIBUTES, "Extended attributes"),
    (FileAttributes::PINNED, "Pinned"),
    (FileAttributes::UNPINNED, "Unpinned"),
    (FileAttributes::RECALL_ON_OPEN, "Recall on open"),
    (FileAttributes::RECALL_ON_DATA_ACCESS, "Recall on data access"),
];

/// Label rendered for an attribute value of exactly zero.
pub const NO_FLAGS_LABEL: &str = "No flags";

/// Separator between decoded labels.
pub const LABEL_SEPARATOR: &str = ", ";

impl FileAttributes {
    /// Converts a parsed attribute number to its bit pattern.
    ///
    /// Fractions are truncated and the result wraps modulo 2^32, so negative
    /// values keep their two's-complement bits.
    pub fn from_numeric(value: f64) -> Self {
        if !value.is_finite() {
            return Self::empty();
        }
        let wrapped = value.trunc().rem_euclid(4_294_967_296.0);
        Self::from_bits_retain(wrapped as u32)
    }
}

/// Returns true if the attribute value has the directory bit set.
pub fn is_directory(value: Option<f64>) -> bool {
    value
        .map(|numeric| FileAttributes::from_numeric(numeric).contains(FileAttributes::DIRECTORY))
        .unwrap_or(false)
}

/// Parses attribute text as an ordinary number.
///
/// Accepts decimal (with optional sign, fraction, and exponent) and unsigned
/// `0x`/`0o`/`0b` literals. Non-finite or unparsable text yields `None`.
pub fn parse_attribute_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(value) = crate::ingest::parse_radix_literal(trimmed) {
        // Precision past 2^53 is irrelevant: only the low 32 bits are tested.
        return Some(value as f64);
    }

    if !trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Renders the attribute text as human-readable labels.
pub fn describe_attributes(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let Some(numeric) = parse_attribute_number(trimmed) else {
        return trimmed.to_string();
    };
    if numeric == 0.0 {
        return NO_FLAGS_LABEL.to_string();
    }

    let flags = FileAttributes::from_numeric(numeric);
    let labels = ATTRIBUTE_LABELS
        .iter()
        .filter(|(mask, _)| flags.contains(*mask))
        .map(|(_, label)| *label)
        .collect::<Vec<_>>();
    if labels.is_empty() {
        return trimmed.to_string();
    }
    labels.join(LABEL_SEPARATOR)
}
