//! Query engine for file-list exports.
//!
//! This crate turns the five-column export of a filesystem-listing tool
//! into a searchable, sortable, paginated view:
//! - Tolerant export parsing into immutable records
//! - Wildcard and regex queries with negation and field scoping
//! - Natural-order sorting and page arithmetic
//! - Size, FILETIME, and attribute formatting for display

pub mod attributes;
pub mod engine;
pub mod error;
pub mod format;
pub mod ingest;
pub mod pagination;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod settings;
pub mod snapshot;
pub mod types;

// Re-export main types
pub use attributes::{describe_attributes, FileAttributes};
pub use engine::ListingEngine;
pub use error::{ListingError, QueryError, Result};
pub use format::{FormattedDate, PLACEHOLDER};
pub use ingest::{ingest, ingest_file};
pub use pagination::{Page, DEFAULT_PAGE_SIZE};
pub use query::{QueryOptions, QueryPlan};
pub use record::{Record, RecordSet};
pub use settings::{load_settings, save_settings, DisplayTimeZone, ListingSettings};
pub use snapshot::{ListingSnapshot, SharedListing};
pub use types::{DateField, SortKey, SortState};
