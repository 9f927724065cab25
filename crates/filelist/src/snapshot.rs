//! Immutable published views of the engine state.
//!
//! A [`ListingSnapshot`] pairs a record set with its filtered, sorted index
//! list. [`SharedListing`] swaps whole snapshots behind a lock so readers on
//! other threads always see one complete view.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::pagination::Page;
use crate::query::QueryOptions;
use crate::record::{Record, RecordSet};
use crate::types::SortState;

/// A consistent record set / filtered view pair.
#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    records: RecordSet,
    filtered: Arc<[usize]>,
    sort: SortState,
    query: String,
    options: QueryOptions,
    include_directories: bool,
    generation: u64,
}

impl Default for ListingSnapshot {
    fn default() -> Self {
        Self::new(
            RecordSet::default(),
            Vec::new().into(),
            SortState::default(),
            String::new(),
            QueryOptions::default(),
            true,
            0,
        )
    }
}

impl ListingSnapshot {
    pub(crate) fn new(
        records: RecordSet,
        filtered: Arc<[usize]>,
        sort: SortState,
        query: String,
        options: QueryOptions,
        include_directories: bool,
        generation: u64,
    ) -> Self {
        Self {
            records,
            filtered,
            sort,
            query,
            options,
            include_directories,
            generation,
        }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Indices into [`Self::records`], in view order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.filtered
            .iter()
            .filter_map(|index| self.records.get(*index))
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn include_directories(&self) -> bool {
        self.include_directories
    }

    /// Counter of the engine state this snapshot was taken from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page(&self, page: usize, page_size: usize) -> Page<'_> {
        Page::collect(&self.records, &self.filtered, page, page_size)
    }
}

/// Copy-on-write handle to the latest published snapshot.
#[derive(Debug, Default)]
pub struct SharedListing {
    current: RwLock<Arc<ListingSnapshot>>,
    publish_count: AtomicU64,
}

impl SharedListing {
    pub fn new(snapshot: Arc<ListingSnapshot>) -> Self {
        Self {
            current: RwLock::new(snapshot),
            publish_count: AtomicU64::new(0),
        }
    }

    /// Replaces the current snapshot. Readers holding the previous one keep it.
    pub fn publish(&self, snapshot: Arc<ListingSnapshot>) {
        let generation = snapshot.generation();
        *self.current.write() = snapshot;
        let count = self.publish_count.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("listing snapshot published generation={generation} publish_count={count}");
    }

    /// Returns the latest snapshot.
    pub fn load(&self) -> Arc<ListingSnapshot> {
        self.current.read().clone()
    }

    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::Relaxed)
    }
}
