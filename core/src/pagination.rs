use crate::error::PageError;

/// Deepest page the upstream list and search endpoints will serve.
pub const MAX_UPSTREAM_PAGE: u32 = 500;

/// Page bookkeeping for a paged result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    total_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self { current: 1, total_pages: 1 }
    }
}

impl Pager {
    /// Zero totals (no results) are treated as a single empty page.
    pub fn new(current: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.clamp(1, MAX_UPSTREAM_PAGE);
        Self { current: current.clamp(1, total_pages), total_pages }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Validate a requested page before anything goes upstream.
    pub fn check(&self, requested: u32) -> Result<u32, PageError> {
        if requested < 1 || requested > self.total_pages {
            return Err(PageError::OutOfRange { requested, total: self.total_pages });
        }
        Ok(requested)
    }

    pub fn previous(&self) -> Result<u32, PageError> {
        self.check(self.current.saturating_sub(1))
    }

    pub fn next(&self) -> Result<u32, PageError> {
        self.check(self.current.saturating_add(1))
    }
}
