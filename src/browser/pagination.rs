//! Pagination slicer over the derived view.
//!
//! Pages are 1-based. The arithmetic lives in free functions so it can be
//! applied to any slice; [`PaginationState`] carries the current page and
//! the navigation rules.

/// Number of records shown per page.
pub const PAGE_SIZE: usize = 10;

// =============================================================================
// Page Arithmetic
// =============================================================================

/// Returns the number of pages needed for `view_size` records.
///
/// An empty view has zero pages. A `page_size` of 0 also yields zero pages.
#[must_use]
pub const fn page_count(view_size: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    view_size.div_ceil(page_size)
}

/// Returns the records on `current_page` (1-based).
///
/// The slice starts at `(current_page - 1) * page_size` and holds at most
/// `page_size` elements, clipped to the view. Page 0 and pages past the
/// end yield an empty slice.
#[must_use]
pub fn current_slice<T>(view: &[T], current_page: usize, page_size: usize) -> &[T] {
    let Some(offset) = current_page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
    else {
        return &[];
    };

    if offset >= view.len() {
        return &[];
    }

    let end = offset.saturating_add(page_size).min(view.len());
    &view[offset..end]
}

// =============================================================================
// Pagination State
// =============================================================================

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: usize,
    current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PaginationState {
    /// Creates a pagination state on page 1.
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is 0.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be greater than 0");
        Self {
            page_size,
            current_page: 1,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Sets the current page to exactly `page`.
    ///
    /// No bounds are checked; out-of-range pages simply produce an empty
    /// slice. Use [`PaginationState::go_to_clamped`] for navigation input.
    pub const fn go_to(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Sets the current page, clamped to `[1, max(1, page_count)]`.
    ///
    /// Returns the page actually selected.
    pub fn go_to_clamped(&mut self, page: usize, view_size: usize) -> usize {
        let last = self.last_page(view_size);
        self.current_page = page.clamp(1, last);
        self.current_page
    }

    /// Returns to page 1.
    pub const fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pulls the current page back into range after the view changed size.
    pub fn clamp_to(&mut self, view_size: usize) {
        self.go_to_clamped(self.current_page, view_size);
    }

    /// Moves one page forward if there is a next page.
    pub fn next(&mut self, view_size: usize) -> bool {
        if self.has_next(view_size) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Moves one page back if there is a previous page.
    pub const fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self, view_size: usize) -> bool {
        self.current_page < page_count(view_size, self.page_size)
    }

    #[must_use]
    pub const fn page_count(&self, view_size: usize) -> usize {
        page_count(view_size, self.page_size)
    }

    const fn last_page(&self, view_size: usize) -> usize {
        let count = page_count(view_size, self.page_size);
        if count == 0 { 1 } else { count }
    }

    /// Returns the current page of `view`.
    #[must_use]
    pub fn slice<'a, T>(&self, view: &'a [T]) -> &'a [T] {
        current_slice(view, self.current_page, self.page_size)
    }

    /// Describes the navigation controls for a view of `view_size` records.
    #[must_use]
    pub fn page_bar(&self, view_size: usize) -> PageBar {
        PageBar {
            pages: (1..=self.page_count(view_size)).collect(),
            active: self.current_page,
            previous_enabled: self.has_previous(),
            next_enabled: self.has_next(view_size),
        }
    }
}

// =============================================================================
// Page Bar
// =============================================================================

/// Navigation controls: previous, one entry per page, next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBar {
    /// Every page number, starting at 1.
    pub pages: Vec<usize>,
    /// The page currently shown.
    pub active: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    #[case(200, 10, 20)]
    #[case(5, 0, 0)]
    fn test_page_count(#[case] view_size: usize, #[case] page_size: usize, #[case] expected: usize) {
        assert_eq!(page_count(view_size, page_size), expected);
    }

    #[rstest]
    #[case(1, 10)]
    #[case(2, 10)]
    #[case(3, 5)]
    #[case(4, 0)]
    #[case(0, 0)]
    fn test_current_slice_lengths_for_25_records(#[case] page: usize, #[case] expected: usize) {
        let view: Vec<usize> = (0..25).collect();
        assert_eq!(current_slice(&view, page, 10).len(), expected);
    }

    #[rstest]
    fn test_current_slice_offsets() {
        let view: Vec<usize> = (0..25).collect();

        assert_eq!(current_slice(&view, 1, 10).first(), Some(&0));
        assert_eq!(current_slice(&view, 2, 10).first(), Some(&10));
        assert_eq!(current_slice(&view, 3, 10), &[20, 21, 22, 23, 24]);
    }

    #[rstest]
    fn test_current_slice_handles_huge_page() {
        let view: Vec<usize> = (0..25).collect();
        assert!(current_slice(&view, usize::MAX, 10).is_empty());
    }

    #[rstest]
    fn test_go_to_sets_exact_page() {
        let mut pagination = PaginationState::default();

        pagination.go_to(42);

        assert_eq!(pagination.current_page(), 42);
        assert!(pagination.slice(&[1, 2, 3]).is_empty());
    }

    #[rstest]
    #[case(0, 25, 1)]
    #[case(2, 25, 2)]
    #[case(9, 25, 3)]
    #[case(4, 0, 1)]
    fn test_go_to_clamped(#[case] page: usize, #[case] view_size: usize, #[case] expected: usize) {
        let mut pagination = PaginationState::default();

        let selected = pagination.go_to_clamped(page, view_size);

        assert_eq!(selected, expected);
        assert_eq!(pagination.current_page(), expected);
    }

    #[rstest]
    fn test_next_and_previous_stop_at_bounds() {
        let mut pagination = PaginationState::default();

        assert!(!pagination.previous());
        assert!(pagination.next(25));
        assert!(pagination.next(25));
        assert!(!pagination.next(25));
        assert_eq!(pagination.current_page(), 3);
        assert!(pagination.previous());
        assert_eq!(pagination.current_page(), 2);
    }

    #[rstest]
    fn test_clamp_to_pulls_back_after_shrink() {
        let mut pagination = PaginationState::default();
        pagination.go_to(5);

        pagination.clamp_to(12);

        assert_eq!(pagination.current_page(), 2);
    }

    #[rstest]
    fn test_reset_returns_to_first_page() {
        let mut pagination = PaginationState::default();
        pagination.go_to(3);

        pagination.reset();

        assert_eq!(pagination.current_page(), 1);
    }

    #[rstest]
    fn test_page_bar_for_middle_page() {
        let mut pagination = PaginationState::default();
        pagination.go_to(2);

        let bar = pagination.page_bar(25);

        assert_eq!(
            bar,
            PageBar {
                pages: vec![1, 2, 3],
                active: 2,
                previous_enabled: true,
                next_enabled: true,
            }
        );
    }

    #[rstest]
    fn test_page_bar_for_empty_view_disables_both_controls() {
        let bar = PaginationState::default().page_bar(0);

        assert!(bar.pages.is_empty());
        assert!(!bar.previous_enabled);
        assert!(!bar.next_enabled);
    }

    #[rstest]
    #[should_panic(expected = "page_size must be greater than 0")]
    fn test_zero_page_size_panics() {
        let _ = PaginationState::new(0);
    }
}
