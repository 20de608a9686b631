//! Client-side pagination.

use std::ops::Range;

use serde::Serialize;

/// Fixed page size of the product grid.
pub const PAGE_SIZE: usize = 20;

/// Number of pages for `total` items. Never less than 1, so an empty list
/// still displays as "Page 1 of 1".
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// The `[page*size, page*size+size)` window, clipped to `total`.
pub fn page_range(page: usize, page_size: usize, total: usize) -> Range<usize> {
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// Zero-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    page: usize,
    page_size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Advance one page unless already on the last. Returns whether it moved.
    pub fn next(&mut self, total: usize) -> bool {
        if self.page + 1 < total_pages(total, self.page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on the first. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.page = page.min(total_pages(total, self.page_size) - 1);
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        page_range(self.page, self.page_size, total)
    }

    pub fn info(&self, total: usize) -> PageInfo {
        PageInfo::new(self.page, self.page_size, total)
    }
}

/// Display metadata for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page (0-indexed).
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = total_pages(total_items, page_size);
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page + 1 < total_pages,
            has_prev: page > 0,
        }
    }

    /// First item number shown (1-indexed), 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.page * self.page_size + 1
        }
    }

    /// Last item number shown.
    pub fn end_item(&self) -> usize {
        ((self.page + 1) * self.page_size).min(self.total_items)
    }

    /// "Page 2 of 3".
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(0, 20), 1);
    }

    #[test]
    fn test_page_range_clips() {
        assert_eq!(page_range(0, 20, 45), 0..20);
        assert_eq!(page_range(2, 20, 45), 40..45);
        assert_eq!(page_range(5, 20, 45), 45..45);
        assert_eq!(page_range(0, 20, 0), 0..0);
    }

    #[test]
    fn test_previous_saturates_at_zero() {
        let mut cursor = PageCursor::default();
        assert!(!cursor.previous());
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn test_next_saturates_at_last_page() {
        let mut cursor = PageCursor::default();
        assert!(cursor.next(45));
        assert!(cursor.next(45));
        assert_eq!(cursor.page(), 2);
        assert!(!cursor.next(45));
        assert_eq!(cursor.page(), 2);
    }

    #[test]
    fn test_next_on_empty() {
        let mut cursor = PageCursor::default();
        assert!(!cursor.next(0));
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut cursor = PageCursor::new(10);
        cursor.go_to(99, 25);
        assert_eq!(cursor.page(), 2);
    }

    #[test]
    fn test_page_info() {
        let info = PageInfo::new(1, 20, 45);
        assert_eq!(info.start_item(), 21);
        assert_eq!(info.end_item(), 40);
        assert!(info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.label(), "Page 2 of 3");

        let empty = PageInfo::new(0, 20, 0);
        assert_eq!(empty.start_item(), 0);
        assert_eq!(empty.end_item(), 0);
        assert_eq!(empty.label(), "Page 1 of 1");
        assert!(!empty.has_next);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let cursor = PageCursor::new(0);
        assert_eq!(cursor.page_size(), 1);
        assert_eq!(total_pages(3, 0), 3);
    }
}
