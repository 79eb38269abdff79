//! Page slicing and the pagination strip.

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// 1-based page number after clamping.
    pub number: usize,
    /// Total number of pages (0 for an empty list).
    pub total_pages: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
}

/// Slices `items` into the requested page.
///
/// `per_page` of zero is treated as one. The page number is clamped into
/// `[1, max(total_pages, 1)]`.
#[must_use]
pub fn paginate<T>(items: &[T], per_page: usize, page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let number = page.clamp(1, total_pages.max(1));

    let start = ((number - 1) * per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: &items[start..end],
        number,
        total_pages,
        total_items,
    }
}

/// Previous/next controls and page numbers for a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationStrip {
    /// Current page (1-based).
    pub current: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// False on the first page.
    pub previous_enabled: bool,
    /// False on the last page and when there are no pages.
    pub next_enabled: bool,
    /// Page numbers to offer, in order.
    pub pages: Vec<usize>,
}

impl PaginationStrip {
    /// Builds the strip for `current` out of `total_pages`.
    #[must_use]
    pub fn new(current: usize, total_pages: usize) -> Self {
        Self {
            current,
            total_pages,
            previous_enabled: current > 1,
            next_enabled: current < total_pages,
            pages: (1..=total_pages).collect(),
        }
    }

    /// Builds the strip for a page.
    #[must_use]
    pub fn for_page<T>(page: &Page<'_, T>) -> Self {
        Self::new(page.number, page.total_pages)
    }
}
