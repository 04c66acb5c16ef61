use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Session feeds historically return larger pages
pub const DEFAULT_SESSION_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized page request: `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self::with_default(page, page_size, DEFAULT_PAGE_SIZE)
    }

    /// Pages below 1 become 1; sizes outside `1..=MAX_PAGE_SIZE` fall back to `default_page_size`.
    pub fn with_default(page: i64, page_size: i64, default_page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
            page_size
        } else {
            default_page_size.clamp(1, MAX_PAGE_SIZE)
        };
        PageRequest { page, page_size }
    }

    /// Builds a request from raw query-string values. Never fails: anything
    /// missing or unparsable is replaced by the default.
    pub fn parse(page: Option<&str>, page_size: Option<&str>, default_page_size: i64) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        let page_size = page_size
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(default_page_size);
        Self::with_default(page, page_size, default_page_size)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Wraps one page of items and the overall row count into the response envelope.
    pub fn respond<T>(&self, items: Vec<T>, total_items: i64) -> PaginatedResponse<T> {
        PaginatedResponse {
            items,
            pagination: Pagination::calculate(self.page, self.page_size, total_items),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    pub fn calculate(current_page: i64, items_per_page: i64, total_items: i64) -> Self {
        let total_pages = if total_items <= 0 || items_per_page <= 0 {
            0
        } else {
            (total_items + items_per_page - 1) / items_per_page
        };

        Pagination {
            current_page,
            total_pages,
            total_items,
            items_per_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}
