//! Filtering and ordering of the record set.
//!
//! A filtered view is a list of indices into the [`RecordSet`]. Filtering
//! keeps ingestion order; sorting then orders the indices by the active
//! [`SortState`], falling back to ingestion order on ties so the result is
//! stable and deterministic in both directions.

use std::cmp::Ordering;
use std::time::Instant;

use icu_collator::{Collator, CollatorOptions, Numeric, Strength};
use icu_locid::locale;
use rayon::prelude::*;

use crate::query::QueryPlan;
use crate::record::{Record, RecordSet};
use crate::types::{SortKey, SortState};

/// Returns the indices of records that pass the directory policy and plan.
pub fn filter_records(
    records: &RecordSet,
    include_directories: bool,
    plan: &QueryPlan,
) -> Vec<usize> {
    let started = Instant::now();
    let filtered = records
        .as_slice()
        .par_iter()
        .enumerate()
        .filter(|(_, record)| {
            (include_directories || !record.is_directory()) && plan.matches(record)
        })
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    log::debug!(
        "filter applied records={} matched={} terms={} include_directories={} elapsed_ms={}",
        records.len(),
        filtered.len(),
        plan.terms().len(),
        include_directories,
        started.elapsed().as_millis(),
    );
    filtered
}

/// Orders filtered indices in place by the given sort state.
pub fn sort_records(records: &RecordSet, filtered: &mut [usize], sort: SortState) {
    let started = Instant::now();
    let slice = records.as_slice();
    filtered.par_sort_unstable_by(|left, right| {
        let primary = compare_records(&slice[*left], &slice[*right], sort.key);
        let directed = if sort.ascending {
            primary
        } else {
            primary.reverse()
        };
        directed.then_with(|| left.cmp(right))
    });

    log::debug!(
        "sort applied key={} ascending={} entries={} elapsed_ms={}",
        sort.key.as_str(),
        sort.ascending,
        filtered.len(),
        started.elapsed().as_millis(),
    );
}

/// Compares two records by a single key, ascending.
pub fn compare_records(left: &Record, right: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::FileName => collate(left.file_name(), right.file_name()),
        SortKey::Path => collate(left.path(), right.path()),
        SortKey::Size => compare_optional(left.size(), right.size()),
        SortKey::Modified => compare_optional(left.modified(), right.modified()),
        SortKey::Created => compare_optional(left.created(), right.created()),
        SortKey::Attributes => collate(left.attributes_label(), right.attributes_label()),
    }
}

thread_local! {
    // One collator per sorting thread; rayon workers build theirs lazily.
    static COLLATOR: Option<Collator> = build_collator();
}

/// Simplified Chinese collation at base strength with numeric runs
/// compared by value: case and accents are ignored, Han sorts by pinyin.
fn build_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Primary);
    options.numeric = Some(Numeric::On);
    match Collator::try_new(&locale!("zh-CN").into(), options) {
        Ok(collator) => Some(collator),
        Err(error) => {
            log::warn!("collation data unavailable, falling back to natural order: {error}");
            None
        }
    }
}

/// Locale-aware, case-insensitive natural collation.
pub fn collate(left: &str, right: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(left, right),
        None => alphanumeric_sort::compare_str(left.to_lowercase(), right.to_lowercase()),
    })
}

/// Absent values sort before every present value.
pub fn compare_optional<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}
