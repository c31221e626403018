/// Page navigation for a paged list (1-based)
///
/// Navigation never wraps: `next` stops on the last page, `previous` on page 1.
/// Changing the page count leaves the current page where it is, so a list that
/// shrinks under the user can show an empty page until they navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    total_pages: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Pager {
            current_page: 1,
            total_pages: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Update the page count after the derived list changed
    pub fn set_total_pages(&mut self, total_pages: usize) {
        self.total_pages = total_pages.max(1);
    }

    /// Move to next page
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Move to previous page
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jump to a page, clamped to `[1, total_pages]`
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages);
        self.current_page
    }

    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    /// Also true when a shrunken list left us past the end
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}
