//! Pagination pass-through.
//!
//! Page, page size and total are owned by the caller (usually a server that
//! returned one page of results). The table never slices rows or computes
//! totals itself: it displays what it is given and forwards page and page-size
//! changes to the caller's callbacks. The helpers here only derive display
//! values such as "Showing 11–20 of 45".

use std::fmt;

/// Default choices offered by the page-size selector.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Externally owned pagination state plus change callbacks.
pub struct Pagination {
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub limit: usize,
    /// Total number of rows across all pages.
    pub total: usize,
    on_page_change: Box<dyn FnMut(usize)>,
    on_limit_change: Box<dyn FnMut(usize)>,
}

impl fmt::Debug for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("page", &self.page)
            .field("limit", &self.limit)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

impl Pagination {
    /// Creates a pagination descriptor with the caller's change handlers.
    pub fn new<P, L>(page: usize, limit: usize, total: usize, on_page_change: P, on_limit_change: L) -> Self
    where
        P: FnMut(usize) + 'static,
        L: FnMut(usize) + 'static,
    {
        Self {
            page,
            limit,
            total,
            on_page_change: Box::new(on_page_change),
            on_limit_change: Box::new(on_limit_change),
        }
    }

    /// Number of pages; at least 1 so an empty result still shows "page 1 of 1".
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        (self.total / self.limit + usize::from(self.total % self.limit != 0)).max(1)
    }

    /// 1-based first and last item shown on the current page, or `None` when
    /// there is nothing to show.
    #[must_use]
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.total == 0 || self.limit == 0 || self.page == 0 {
            return None;
        }
        let first = (self.page - 1).saturating_mul(self.limit).saturating_add(1);
        if first > self.total {
            return None;
        }
        let last = self.page.saturating_mul(self.limit).min(self.total);
        Some((first, last))
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Forwards a page change to the caller. The descriptor is not updated:
    /// the caller supplies the new state on the next render.
    pub fn change_page(&mut self, page: usize) {
        tracing::debug!(from = self.page, to = page, "page change requested");
        (self.on_page_change)(page);
    }

    /// Forwards a page-size change to the caller.
    pub fn change_limit(&mut self, limit: usize) {
        tracing::debug!(from = self.limit, to = limit, "page size change requested");
        (self.on_limit_change)(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn pagination(page: usize, limit: usize, total: usize) -> Pagination {
        Pagination::new(page, limit, total, |_| {}, |_| {})
    }

    #[rstest]
    #[case(1, 10, 45, 5, Some((1, 10)))]
    #[case(5, 10, 45, 5, Some((41, 45)))]
    #[case(2, 25, 50, 2, Some((26, 50)))]
    #[case(1, 10, 0, 1, None)]
    #[case(9, 10, 45, 5, None)]
    #[case(1, 10, usize::MAX, usize::MAX / 10 + 1, Some((1, 10)))]
    #[case(1, usize::MAX, usize::MAX, 1, Some((1, usize::MAX)))]
    fn test_derived_values(
        #[case] page: usize,
        #[case] limit: usize,
        #[case] total: usize,
        #[case] pages: usize,
        #[case] range: Option<(usize, usize)>,
    ) {
        let p = pagination(page, limit, total);
        assert_eq!(p.total_pages(), pages);
        assert_eq!(p.range(), range);
    }

    #[test]
    fn test_previous_next() {
        assert!(!pagination(1, 10, 45).has_previous());
        assert!(pagination(1, 10, 45).has_next());
        assert!(pagination(5, 10, 45).has_previous());
        assert!(!pagination(5, 10, 45).has_next());
    }

    #[test]
    fn test_changes_are_forwarded_not_applied() {
        let pages = Rc::new(RefCell::new(Vec::new()));
        let limits = Rc::new(RefCell::new(Vec::new()));
        let (p, l) = (Rc::clone(&pages), Rc::clone(&limits));
        let mut pagination = Pagination::new(
            1,
            10,
            45,
            move |page| p.borrow_mut().push(page),
            move |limit| l.borrow_mut().push(limit),
        );

        pagination.change_page(3);
        pagination.change_limit(25);

        assert_eq!(*pages.borrow(), vec![3]);
        assert_eq!(*limits.borrow(), vec![25]);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);
    }
}
