//! Shared value types for the listing view.

use serde::{Deserialize, Serialize};

/// Column a filtered view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    FileName,
    Path,
    Size,
    Modified,
    Created,
    Attributes,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::FileName,
        Self::Path,
        Self::Size,
        Self::Modified,
        Self::Created,
        Self::Attributes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileName => "file_name",
            Self::Path => "path",
            Self::Size => "size",
            Self::Modified => "modified",
            Self::Created => "created",
            Self::Attributes => "attributes",
        }
    }
}

/// The active single-key ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState {
    pub key: SortKey,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::FileName,
            ascending: true,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, ascending: bool) -> Self {
        Self { key, ascending }
    }

    /// Header-click behaviour: the same key flips direction, a new key
    /// starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                ascending: !self.ascending,
            }
        } else {
            Self {
                key,
                ascending: true,
            }
        }
    }
}

/// Which timestamp column of a record to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Modified,
    Created,
}
