/// Rows shown per page in the membership directory.
pub const PAGE_SIZE: usize = 5;

/// Stateless window over the merged directory. The offset is always a
/// multiple of PAGE_SIZE and never leaves `[0, (total_pages - 1) * PAGE_SIZE]`;
/// boundary moves are no-ops rather than wraparounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    offset: usize,
    total: usize,
}

impl Pager {
    pub fn new(total: usize) -> Self {
        Self { offset: 0, total }
    }

    /// Builds a pager at a caller-supplied offset, floored to a PAGE_SIZE
    /// multiple and clamped to the last page.
    pub fn with_offset(total: usize, offset: usize) -> Self {
        let mut pager = Self::new(total);
        pager.offset = (offset / PAGE_SIZE * PAGE_SIZE).min(pager.max_offset());
        pager
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// At least 1, so an empty directory still renders as page 1 of 1.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(PAGE_SIZE).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.offset / PAGE_SIZE + 1
    }

    pub fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(PAGE_SIZE);
    }

    pub fn next_page(&mut self) {
        self.offset = (self.offset + PAGE_SIZE).min(self.max_offset());
    }

    /// Applies the current window to one sub-list. Members and invitations
    /// are sliced independently with the same window, reproducing the
    /// parallel pagination of the two lists.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = (self.offset + PAGE_SIZE).min(items.len());
        &items[start..end]
    }

    fn max_offset(&self) -> usize {
        (self.total_pages() - 1) * PAGE_SIZE
    }
}
