pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// 1-based page over `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    /// 1-based index of the first row shown, 0 when there is nothing to show.
    pub fn first_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    pub fn last_item(&self) -> usize {
        (self.page * self.page_size).min(self.total_items)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        self.page = self.page.min(self.total_pages());
        self
    }

    pub fn go_to(mut self, page: usize) -> Self {
        self.page = page.clamp(1, self.total_pages());
        self
    }

    pub fn next(self) -> Self {
        let page = self.page + 1;
        self.go_to(page)
    }

    pub fn previous(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.go_to(page)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page = 1;
        self
    }

    /// `"26-50 of 120"`
    pub fn range_label(&self) -> String {
        format!(
            "{}-{} of {}",
            self.first_item(),
            self.last_item(),
            self.total_items
        )
    }
}
