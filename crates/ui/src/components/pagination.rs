//! Pagination control view model
//!
//! Computes what a pager shows (page window with gaps, row range, size
//! choices) and the [`PageChange`] each of its controls emits. Size and
//! number always travel together.

use std::collections::BTreeSet;

use cadence_core::{PageChange, PageState};
use serde::Serialize;

/// Page sizes offered by the size picker
pub const PAGE_SIZE_CHOICES: [u32; 4] = [10, 25, 50, 100];

/// Pages always shown at each end of the window
const EDGE_PAGES: u64 = 1;

/// Pages shown on each side of the current one
const AROUND_CURRENT: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub pages: Vec<Option<u64>>,
}

impl PaginationView {
    pub fn new(page: &PageState) -> Self {
        let total_pages = page.total_pages();
        Self {
            page_number: page.page_number,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages,
            pages: Self::window(total_pages, u64::from(page.page_number)),
        }
    }

    /// Page numbers the pager shows; `None` marks a run of hidden pages
    fn window(total_pages: u64, current: u64) -> Vec<Option<u64>> {
        if total_pages == 0 {
            return Vec::new();
        }
        let current = current.clamp(1, total_pages);
        let near = current.saturating_sub(AROUND_CURRENT).max(1)
            ..=current.saturating_add(AROUND_CURRENT).min(total_pages);
        let shown: BTreeSet<u64> = (1..=EDGE_PAGES.min(total_pages))
            .chain(near)
            .chain(total_pages - EDGE_PAGES.min(total_pages) + 1..=total_pages)
            .collect();

        let mut window = Vec::with_capacity(shown.len() + 2);
        let mut previous = 0;
        for page in shown {
            if page > previous + 1 {
                window.push(None);
            }
            window.push(Some(page));
            previous = page;
        }
        window
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page_number) < self.total_pages
    }

    pub fn go_to(&self, page_number: u32) -> PageChange {
        PageChange::new(self.page_size, page_number.max(1))
    }

    pub fn previous(&self) -> Option<PageChange> {
        self.has_previous().then(|| self.go_to(self.page_number - 1))
    }

    pub fn next(&self) -> Option<PageChange> {
        let next = self.page_number.checked_add(1)?;
        self.has_next().then(|| self.go_to(next))
    }

    /// Change the page size; the page number is kept
    pub fn resize(&self, page_size: u32) -> PageChange {
        PageChange::new(page_size, self.page_number)
    }

    /// 1-based inclusive row range on screen, `None` when there are no rows
    pub fn range(&self) -> Option<(u64, u64)> {
        if self.total_count == 0 {
            return None;
        }
        let start = u64::from(self.page_size) * u64::from(self.page_number.saturating_sub(1)) + 1;
        if start > self.total_count {
            return None;
        }
        let end = (start + u64::from(self.page_size) - 1).min(self.total_count);
        Some((start, end))
    }

    /// "11-20 of 42"
    pub fn summary(&self) -> String {
        match self.range() {
            Some((start, end)) => format!("{start}-{end} of {}", self.total_count),
            None => format!("0 of {}", self.total_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view(page_number: u32, page_size: u32, total_count: u64) -> PaginationView {
        PaginationView::new(&PageState {
            page_number,
            page_size,
            total_count,
        })
    }

    #[test]
    fn test_no_rows_no_pages() {
        let view = view(1, 10, 0);
        assert!(view.pages.is_empty());
        assert_eq!(view.summary(), "0 of 0");
        assert!(view.next().is_none());
    }

    #[test]
    fn test_short_window_has_no_gaps() {
        assert_eq!(view(2, 10, 42).pages, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn test_window_with_gaps() {
        assert_eq!(
            view(10, 10, 200).pages,
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20)
            ]
        );
    }

    #[test]
    fn test_navigation_keeps_size() {
        let view = view(2, 25, 100);
        assert_eq!(view.next(), Some(PageChange::new(25, 3)));
        assert_eq!(view.previous(), Some(PageChange::new(25, 1)));
        assert_eq!(view.resize(50), PageChange::new(50, 2));
    }

    #[test]
    fn test_gap_hides_a_single_page() {
        assert_eq!(
            view(5, 10, 100).pages,
            vec![
                Some(1),
                None,
                Some(3),
                Some(4),
                Some(5),
                Some(6),
                Some(7),
                None,
                Some(10)
            ]
        );
        assert_eq!(view(1, 10, 5).pages, vec![Some(1)]);
    }

    #[test]
    fn test_next_at_largest_page_number() {
        let view = view(u32::MAX, 1, u64::from(u32::MAX) + 5);
        assert!(view.has_next());
        assert_eq!(view.next(), None);
        assert_eq!(view.previous(), Some(PageChange::new(1, u32::MAX - 1)));
        assert_eq!(
            view.pages,
            vec![
                Some(1),
                None,
                Some(u64::from(u32::MAX) - 2),
                Some(u64::from(u32::MAX) - 1),
                Some(u64::from(u32::MAX)),
                Some(u64::from(u32::MAX) + 1),
                Some(u64::from(u32::MAX) + 2),
                None,
                Some(u64::from(u32::MAX) + 5)
            ]
        );
    }

    #[test]
    fn test_summary_on_last_page() {
        assert_eq!(view(5, 10, 42).summary(), "41-42 of 42");
        assert!(!view(5, 10, 42).has_next());
    }
}
