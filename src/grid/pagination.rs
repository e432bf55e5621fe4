//! Page slicing and the page-button window.

use std::ops::Range;

/// Maximum number of page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Start on page 1 with `page_size` rows per page (at least 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current page number (1-indexed).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Request a page; clamped on the next [`PageState::clamp`].
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Change the page size (at least 1), keeping the current page number.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Clamp the current page into `1..=total_pages`.
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Number of pages for `len` rows: never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Page numbers to show as buttons, at most [`PAGE_WINDOW`] wide.
///
/// The window starts at 1 near the beginning, ends at `total` near the end,
/// and is centred on `current` otherwise.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let total = total.max(1);
    let half = PAGE_WINDOW / 2;
    let range = if total <= PAGE_WINDOW {
        1..=total
    } else if current <= half + 1 {
        1..=PAGE_WINDOW
    } else if current + half >= total {
        (total + 1 - PAGE_WINDOW)..=total
    } else {
        (current - half)..=(current + half)
    };
    range.collect()
}

/// The visible portion of an ordered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// Index range into the ordered result.
    pub range: Range<usize>,
    /// Total number of pages.
    pub total_pages: usize,
    /// Page number the slice belongs to, after clamping.
    pub current_page: usize,
    /// Page-button window.
    pub page_buttons: Vec<usize>,
}

/// Clamp `state` against `len` rows and compute the visible slice.
///
/// With pagination off, the whole result is a single page.
pub fn paginate(len: usize, state: &mut PageState, enabled: bool) -> PageSlice {
    if !enabled {
        state.clamp(1);
        return PageSlice {
            range: 0..len,
            total_pages: 1,
            current_page: 1,
            page_buttons: vec![1],
        };
    }

    let total = total_pages(len, state.page_size());
    state.clamp(total);
    let current = state.current_page();
    let start = ((current - 1) * state.page_size()).min(len);
    let end = (start + state.page_size()).min(len);

    PageSlice {
        range: start..end,
        total_pages: total,
        current_page: current,
        page_buttons: page_window(current, total),
    }
}
