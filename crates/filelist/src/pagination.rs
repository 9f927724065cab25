//! Page arithmetic over an ordered result set.
//!
//! Pages are 1-based. Page `0` means "no pages" and only occurs when the
//! result set is empty.

use std::ops::Range;

use crate::record::{Record, RecordSet};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of pages needed for `count` records; zero when there are none.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if count == 0 || page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamps a requested page into `[1, total_pages]`, or `0` without pages.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        return 0;
    }
    page.clamp(1, total_pages)
}

/// Index window of a page within `count` records; empty for page `0`.
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> Range<usize> {
    if page == 0 || page_size == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(page_size).min(count);
    let end = page.saturating_mul(page_size).min(count);
    start..end
}

/// Slices an ordered set down to one page.
pub fn slice_page<T>(ordered: &[T], page: usize, page_size: usize) -> &[T] {
    &ordered[page_bounds(page, page_size, ordered.len())]
}

/// One page of a filtered view.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// Records on this page, in view order.
    pub items: Vec<&'a Record>,
    /// The clamped 1-based page number, or 0 when there are no pages.
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Size of the whole filtered view.
    pub filtered_count: usize,
}

impl<'a> Page<'a> {
    /// Builds the page of `ordered` (indices into `records`) nearest to
    /// `requested`, clamping it into range.
    pub fn collect(
        records: &'a RecordSet,
        ordered: &[usize],
        requested: usize,
        page_size: usize,
    ) -> Self {
        let total_pages = total_pages(ordered.len(), page_size);
        let current_page = clamp_page(requested, total_pages);
        let items = slice_page(ordered, current_page, page_size)
            .iter()
            .filter_map(|index| records.get(*index))
            .collect();
        Self {
            items,
            current_page,
            total_pages,
            page_size,
            filtered_count: ordered.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.current_page < self.total_pages
    }

    /// Splits the page into bounded batches for progressive consumers.
    ///
    /// The page is already complete; batching only bounds how much a caller
    /// handles between yields.
    pub fn batches(&self, batch_size: usize) -> std::slice::Chunks<'_, &'a Record> {
        self.items.chunks(batch_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_five_records_make_three_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(page_bounds(3, 20, 45).len(), 5);
        assert_eq!(clamp_page(4, 3), 3);
    }

    #[test]
    fn empty_set_has_no_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(clamp_page(1, 0), 0);
        assert_eq!(clamp_page(7, 0), 0);
        assert!(page_bounds(0, 20, 0).is_empty());
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(page_bounds(2, 20, 40), 20..40);
    }

    #[test]
    fn page_zero_clamps_to_first_page() {
        assert_eq!(clamp_page(0, 5), 1);
    }

    #[test]
    fn slice_returns_the_page_window() {
        let values = (0..45).collect::<Vec<_>>();
        assert_eq!(slice_page(&values, 1, 20), &values[0..20]);
        assert_eq!(slice_page(&values, 3, 20), &[40, 41, 42, 43, 44]);
        assert!(slice_page(&values, 0, 20).is_empty());
        assert!(slice_page(&values, 9, 20).is_empty());
    }

    #[test]
    fn collect_clamps_past_the_end() {
        let records = RecordSet::new(
            (0..45)
                .map(|index| Record::from_columns(&format!("f{index}"), "1", "", "", "32"))
                .collect(),
        );
        let ordered = (0..45).rev().collect::<Vec<_>>();
        let page = Page::collect(&records, &ordered, 4, 20);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].file_name(), "f4");
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn collect_on_empty_view_is_page_zero() {
        let records = RecordSet::default();
        let page = Page::collect(&records, &[], 1, 20);
        assert_eq!(page.current_page, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_previous());
    }

    #[test]
    fn batches_cover_the_page() {
        let record = Record::from_columns("a", "1", "", "", "32");
        let page = Page {
            items: vec![&record; 5],
            current_page: 1,
            total_pages: 1,
            page_size: 20,
            filtered_count: 5,
        };
        let sizes = page.batches(2).map(|batch| batch.len()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
