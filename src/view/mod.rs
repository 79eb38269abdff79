//! Presentation-independent view layer: search, pagination, and the page
//! model handed to renderers.

mod pagination;
mod search;

pub use pagination::{Page, PaginationStrip, paginate};
pub use search::SearchFilter;

use crate::models::Record;

/// A rendered page of a resource: the rows to show plus navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Records on the page.
    pub rows: Vec<Record>,
    /// Navigation controls.
    pub strip: PaginationStrip,
    /// Records matching the search term, across all pages.
    pub total_matches: usize,
    /// Page size used.
    pub per_page: usize,
    /// Active search term (empty when unfiltered).
    pub search: String,
}

impl PageView {
    /// Builds a page view from filtered records.
    #[must_use]
    pub fn build(filtered: &[&Record], per_page: usize, page: usize, search: &str) -> Self {
        let per_page = per_page.max(1);
        let slice = paginate(filtered, per_page, page);
        Self {
            rows: slice.items.iter().map(|record| (*record).clone()).collect(),
            strip: PaginationStrip::for_page(&slice),
            total_matches: slice.total_items,
            per_page,
            search: search.trim().to_string(),
        }
    }

    /// Returns true if no records match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;
    use serde_json::Map;

    #[test]
    fn test_page_view_build() {
        let records: Vec<Record> = (1..=7)
            .map(|i| Record::new(RecordId::synced(i), Map::new()))
            .collect();
        let refs: Vec<&Record> = records.iter().collect();

        let view = PageView::build(&refs, 3, 3, " para ");
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, RecordId::synced(7));
        assert_eq!(view.strip.current, 3);
        assert_eq!(view.total_matches, 7);
        assert_eq!(view.search, "para");
        assert!(!view.strip.next_enabled);
    }

    #[test]
    fn test_page_view_empty() {
        let view = PageView::build(&[], 10, 1, "");
        assert!(view.is_empty());
        assert_eq!(view.strip.total_pages, 0);
    }
}
