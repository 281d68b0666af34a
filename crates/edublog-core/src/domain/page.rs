//! Pagination primitives shared by every listing endpoint.

/// A validated, 1-based pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Zero-based page index, as the ORM paginator counts.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

/// Sort direction for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One page of results plus the bookkeeping clients render.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from fetched items and the overall row count.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let per_page = request.per_page.max(1);
        Self {
            items,
            page: request.page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }

    /// Convert the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
