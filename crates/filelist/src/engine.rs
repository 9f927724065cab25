//! The listing view engine.
//!
//! [`ListingEngine`] owns the ingested record set together with everything
//! that shapes the visible view: the compiled query, the directory policy,
//! the sort order, and the current page. Every mutation recomputes the
//! filtered view synchronously, so the view always reflects the state.

use std::path::Path;
use std::sync::Arc;

use crate::error::{ListingError, QueryError, Result};
use crate::format::{self, FormattedDate};
use crate::ingest;
use crate::pagination::{clamp_page, total_pages, Page};
use crate::pipeline::{filter_records, sort_records};
use crate::query::{QueryOptions, QueryPlan};
use crate::record::{Record, RecordSet};
use crate::settings::{DisplayTimeZone, ListingSettings};
use crate::snapshot::ListingSnapshot;
use crate::types::{DateField, SortKey, SortState};

#[derive(Debug, Clone)]
pub struct ListingEngine {
    records: RecordSet,
    filtered: Arc<[usize]>,
    plan: QueryPlan,
    query: String,
    options: QueryOptions,
    query_error: Option<QueryError>,
    include_directories: bool,
    sort: SortState,
    page_size: usize,
    page: usize,
    time_zone: DisplayTimeZone,
    theme: String,
    /// Bumped on every change to the visible view.
    generation: u64,
}

impl Default for ListingEngine {
    fn default() -> Self {
        Self::with_settings(ListingSettings::default())
    }
}

impl ListingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine configured from persisted settings.
    ///
    /// The stored query is compiled immediately; if it no longer compiles
    /// the error is kept and reported by [`Self::query_error`].
    pub fn with_settings(settings: ListingSettings) -> Self {
        let mut engine = Self {
            records: RecordSet::default(),
            filtered: Vec::new().into(),
            plan: QueryPlan::empty(),
            query: String::new(),
            options: QueryOptions::default(),
            query_error: None,
            include_directories: true,
            sort: SortState::default(),
            page_size: settings.effective_page_size(),
            page: 0,
            time_zone: settings.time_zone,
            theme: String::new(),
            generation: 0,
        };
        engine.apply_settings(&settings);
        engine
    }

    /// Current preferences, ready to be persisted.
    pub fn settings(&self) -> ListingSettings {
        ListingSettings {
            last_query: self.query.clone(),
            regex_search: self.options.regex,
            case_sensitive: self.options.case_sensitive,
            include_directories: self.include_directories,
            page_size: self.page_size,
            sort_key: self.sort.key,
            sort_ascending: self.sort.ascending,
            theme: self.theme.clone(),
            time_zone: self.time_zone,
        }
    }

    /// Applies persisted preferences and rebuilds the view.
    pub fn apply_settings(&mut self, settings: &ListingSettings) {
        self.include_directories = settings.include_directories;
        self.sort = settings.sort_state();
        self.page_size = settings.effective_page_size();
        self.time_zone = settings.time_zone;
        self.theme = settings.theme.clone();
        let options = QueryOptions {
            regex: settings.regex_search,
            case_sensitive: settings.case_sensitive,
        };
        if let Err(error) = self.set_query(&settings.last_query, options) {
            log::warn!("stored query no longer compiles: {error}");
        }
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Replaces the record set with a freshly parsed export.
    ///
    /// Resets the query and sort order; regex and case toggles, the
    /// directory policy, and the page size are kept.
    pub fn ingest(&mut self, raw_text: &str) -> &RecordSet {
        let records = ingest::ingest(raw_text);
        self.replace_records(records)
    }

    /// Reads and ingests an export file.
    ///
    /// On failure the current record set is left untouched.
    pub fn ingest_file(&mut self, path: &Path) -> Result<&RecordSet> {
        let records = ingest::ingest_file(path)?;
        Ok(self.replace_records(records))
    }

    fn replace_records(&mut self, records: RecordSet) -> &RecordSet {
        self.records = records;
        self.plan = QueryPlan::empty();
        self.query.clear();
        self.query_error = None;
        self.sort = SortState::default();
        self.refresh_filtered();
        self.page = clamp_page(1, self.total_pages());
        &self.records
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    /// Compiles and applies a query, returning the filtered count.
    ///
    /// An invalid query empties the view and is kept as the current
    /// [`Self::query_error`]; the record set is never touched.
    pub fn set_query(
        &mut self,
        text: &str,
        options: QueryOptions,
    ) -> std::result::Result<usize, QueryError> {
        self.query = text.to_string();
        self.options = options;

        let outcome = match QueryPlan::compile(text, options) {
            Ok(plan) => {
                self.plan = plan;
                self.query_error = None;
                self.refresh_filtered();
                Ok(self.filtered.len())
            }
            Err(error) => {
                log::debug!("query rejected: {error}");
                self.plan = QueryPlan::empty();
                self.query_error = Some(error.clone());
                self.filtered = Vec::new().into();
                self.generation += 1;
                Err(error)
            }
        };
        self.page = clamp_page(1, self.total_pages());
        outcome
    }

    /// Switches between wildcard and regex interpretation and re-runs the query.
    pub fn set_regex_mode(&mut self, regex: bool) -> std::result::Result<usize, QueryError> {
        let query = std::mem::take(&mut self.query);
        let options = QueryOptions {
            regex,
            ..self.options
        };
        self.set_query(&query, options)
    }

    pub fn set_case_sensitive(
        &mut self,
        case_sensitive: bool,
    ) -> std::result::Result<usize, QueryError> {
        let query = std::mem::take(&mut self.query);
        let options = QueryOptions {
            case_sensitive,
            ..self.options
        };
        self.set_query(&query, options)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn query_options(&self) -> QueryOptions {
        self.options
    }

    /// The error from the last query, if it failed to compile.
    pub fn query_error(&self) -> Option<&QueryError> {
        self.query_error.as_ref()
    }

    // ------------------------------------------------------------------
    // Directory policy and sorting
    // ------------------------------------------------------------------

    /// Shows or hides directories, returning the filtered count.
    pub fn set_directory_inclusion(&mut self, include: bool) -> usize {
        self.include_directories = include;
        if self.query_error.is_none() {
            self.refresh_filtered();
        }
        self.reclamp_page();
        self.filtered.len()
    }

    pub fn include_directories(&self) -> bool {
        self.include_directories
    }

    pub fn set_sort(&mut self, key: SortKey, ascending: bool) {
        self.sort = SortState::new(key, ascending);
        self.resort();
    }

    /// Header-click sorting: the active key flips direction, another key
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortState {
        self.sort = self.sort.toggled(key);
        self.resort();
        self.sort
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    fn resort(&mut self) {
        let mut ordered = self.filtered.to_vec();
        sort_records(&self.records, &mut ordered, self.sort);
        self.filtered = ordered.into();
        self.generation += 1;
        self.reclamp_page();
    }

    fn refresh_filtered(&mut self) {
        let mut ordered = filter_records(&self.records, self.include_directories, &self.plan);
        sort_records(&self.records, &mut ordered, self.sort);
        self.filtered = ordered.into();
        self.generation += 1;
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Returns the requested page, clamped into range, and makes it current.
    pub fn get_page(&mut self, page_index: usize, page_size: usize) -> Result<Page<'_>> {
        self.set_page_size(page_size)?;
        self.page = clamp_page(page_index, self.total_pages());
        Ok(self.page())
    }

    /// The current page.
    pub fn page(&self) -> Page<'_> {
        Page::collect(&self.records, &self.filtered, self.page, self.page_size)
    }

    /// Changes the page size, keeping the current page number when it is
    /// still in range.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(ListingError::InvalidInput(
                "page size must be positive".to_string(),
            ));
        }
        self.page_size = page_size;
        self.reclamp_page();
        Ok(())
    }

    /// Jumps to a page; numbers past the end land on the last page.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page = clamp_page(page, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    fn reclamp_page(&mut self) {
        self.page = clamp_page(self.page, self.total_pages());
    }

    // ------------------------------------------------------------------
    // Display helpers
    // ------------------------------------------------------------------

    pub fn format_size(&self, record: &Record) -> String {
        format::format_record_size(record)
    }

    pub fn format_date(&self, record: &Record, field: DateField) -> FormattedDate {
        format::format_date(record, field, self.time_zone)
    }

    pub fn describe_attributes(&self, record: &Record) -> String {
        record.attributes_label().to_string()
    }

    /// Total size of every non-directory record, regardless of the filter.
    pub fn aggregate_size(&self) -> String {
        format::aggregate_size(&self.records)
    }

    pub fn time_zone(&self) -> DisplayTimeZone {
        self.time_zone
    }

    pub fn set_time_zone(&mut self, zone: DisplayTimeZone) {
        self.time_zone = zone;
    }

    // ------------------------------------------------------------------
    // Metrics and views
    // ------------------------------------------------------------------

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Filtered records in view order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.filtered
            .iter()
            .filter_map(|index| self.records.get(*index))
    }

    /// Captures the current view for publication to other threads.
    pub fn snapshot(&self) -> Arc<ListingSnapshot> {
        Arc::new(ListingSnapshot::new(
            self.records.clone(),
            Arc::clone(&self.filtered),
            self.sort,
            self.query.clone(),
            self.options,
            self.include_directories,
            self.generation,
        ))
    }
}
