use serde::Serialize;

/// Number of products shown on one catalog page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 18;

/// Maximum number of consecutive page links around the current page.
const PAGE_WINDOW: usize = 5;

/// Number of pages needed to show `total_items` at `per_page` items each.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

/// Returns the items of the 1-indexed `page`, or an empty slice when the page
/// lies beyond the end of `items`.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Builds the page links for the pagination bar. `None` marks an ellipsis.
fn get_pages(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages <= 1 {
        return vec![];
    }

    let mut start = current_page.saturating_sub(2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end - start + 1 < PAGE_WINDOW {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }

    let mut pages = Vec::new();

    if start > 1 {
        pages.push(Some(1));
        if start > 2 {
            pages.push(None);
        }
    }

    pages.extend((start..=end).map(Some));

    if end < total_pages {
        if end < total_pages - 1 {
            pages.push(None);
        }
        pages.push(Some(total_pages));
    }

    pages
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
        }
    }

    /// Cuts one page out of the complete list. The page is clamped into
    /// `[1, total_pages]`.
    pub fn from_slice(all: &[T], page: usize, per_page: usize) -> Self
    where
        T: Clone,
    {
        let total = total_pages(all.len(), per_page);
        let page = page.clamp(1, total.max(1));
        let items = page_slice(all, page, per_page).to_vec();
        Self::new(items, page, total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether any page controls should be shown at all.
    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }
}
