//! Persisted view preferences.
//!
//! Stored as a JSON document. Unknown fields are ignored and missing fields
//! fall back to their defaults, so older files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ListingError, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::types::{SortKey, SortState};

pub const SETTINGS_FILENAME: &str = "filelist.json";
pub const DEFAULT_THEME: &str = "light";

/// Zone that timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTimeZone {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    pub last_query: String,
    pub regex_search: bool,
    pub case_sensitive: bool,
    pub include_directories: bool,
    pub page_size: usize,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
    /// Opaque to the engine; owned by whatever renders the view.
    pub theme: String,
    pub time_zone: DisplayTimeZone,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            last_query: String::new(),
            regex_search: false,
            case_sensitive: false,
            include_directories: true,
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: SortKey::default(),
            sort_ascending: true,
            theme: DEFAULT_THEME.to_string(),
            time_zone: DisplayTimeZone::default(),
        }
    }
}

impl ListingSettings {
    pub fn sort_state(&self) -> SortState {
        SortState::new(self.sort_key, self.sort_ascending)
    }

    /// A zero page size is replaced by the default.
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

/// Loads settings from `path`, returning defaults when the file is missing.
pub fn load_settings(path: &Path) -> Result<ListingSettings> {
    if !path.exists() {
        return Ok(ListingSettings::default());
    }

    let data = std::fs::read_to_string(path).map_err(|error| {
        ListingError::Settings(format!(
            "failed to read settings {}: {error}",
            path.display()
        ))
    })?;
    serde_json::from_str(&data).map_err(|error| {
        ListingError::Settings(format!(
            "failed to parse settings {}: {error}",
            path.display()
        ))
    })
}

/// Like [`load_settings`], but logs failures and falls back to defaults.
pub fn load_settings_or_default(path: &Path) -> ListingSettings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(error) => {
            log::warn!("using default settings: {error}");
            ListingSettings::default()
        }
    }
}

/// Writes settings to `path`, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &ListingSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            ListingError::Settings(format!(
                "failed to create settings directory {}: {error}",
                parent.display()
            ))
        })?;
    }

    let data = serde_json::to_string_pretty(settings).map_err(|error| {
        ListingError::Settings(format!(
            "failed to serialize settings {}: {error}",
            path.display()
        ))
    })?;
    std::fs::write(path, data).map_err(|error| {
        ListingError::Settings(format!(
            "failed to write settings {}: {error}",
            path.display()
        ))
    })?;
    log::debug!("settings saved path={}", path.display());
    Ok(())
}
