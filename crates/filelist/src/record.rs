//! Typed filesystem records and the immutable record set.

use std::ops::Index;
use std::sync::Arc;

use crate::attributes::{describe_attributes, is_directory, parse_attribute_number};
use crate::ingest::parse_unsigned_integer;

/// One entry of a file-list export.
///
/// Records never change after construction; a new export replaces the
/// whole [`RecordSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    path: String,
    file_name: String,
    size_raw: String,
    size: Option<u128>,
    modified_raw: String,
    modified: Option<u128>,
    created_raw: String,
    created: Option<u128>,
    attributes_raw: String,
    attributes: Option<f64>,
    is_directory: bool,
    search_text: String,
    attributes_label: String,
}

impl Record {
    /// Builds a record from the five export columns.
    pub fn from_columns(
        path: &str,
        size: &str,
        modified: &str,
        created: &str,
        attributes: &str,
    ) -> Self {
        let file_name = extract_file_name(path).to_string();
        let attributes_value = parse_attribute_number(attributes);
        let search_text = format!("{path} {file_name} {attributes}");

        Self {
            attributes_label: describe_attributes(attributes),
            path: path.to_string(),
            file_name,
            size_raw: size.to_string(),
            size: parse_unsigned_integer(size),
            modified_raw: modified.to_string(),
            modified: parse_unsigned_integer(modified),
            created_raw: created.to_string(),
            created: parse_unsigned_integer(created),
            attributes_raw: attributes.to_string(),
            attributes: attributes_value,
            is_directory: is_directory(attributes_value),
            search_text,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size_raw(&self) -> &str {
        &self.size_raw
    }

    /// Size in bytes, or `None` if the column was empty or invalid.
    pub fn size(&self) -> Option<u128> {
        self.size
    }

    pub fn modified_raw(&self) -> &str {
        &self.modified_raw
    }

    /// Modification time as FILETIME ticks.
    pub fn modified(&self) -> Option<u128> {
        self.modified
    }

    pub fn created_raw(&self) -> &str {
        &self.created_raw
    }

    /// Creation time as FILETIME ticks.
    pub fn created(&self) -> Option<u128> {
        self.created
    }

    pub fn attributes_raw(&self) -> &str {
        &self.attributes_raw
    }

    pub fn attributes(&self) -> Option<f64> {
        self.attributes
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Path, file name, and attribute text joined by spaces.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Rendered attribute labels, as produced by [`describe_attributes`].
    pub fn attributes_label(&self) -> &str {
        &self.attributes_label
    }
}

/// Returns the last path component, splitting on both `/` and `\`.
///
/// Falls back to the whole path when the last component is empty.
pub fn extract_file_name(path: &str) -> &str {
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}

/// An ingested export: records in file order behind a shared handle.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Arc<[Record]>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Returns true if both handles share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
