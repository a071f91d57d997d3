//! Page requests and the uniform page envelope returned by listing operations.

use serde::Serialize;

use super::errors::{DomainError, DomainResult};

/// Largest page a caller may ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Offset/limit window derived from a validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// A 1-based page of `limit` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validates `page >= 1` and `0 < limit <= MAX_PAGE_LIMIT`.
    pub fn new(page: u32, limit: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::Validation("page must be >= 1".into()));
        }
        if limit == 0 {
            return Err(DomainError::Validation("limit must be > 0".into()));
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(DomainError::Validation(format!(
                "limit must be <= {}",
                MAX_PAGE_LIMIT
            )));
        }
        Ok(Self { page, limit })
    }

    /// Builds a request from optional query parameters.
    pub fn from_params(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> DomainResult<Self> {
        Self::new(page.unwrap_or(1), limit.unwrap_or(default_limit))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows `(page-1)*limit ..= page*limit-1`.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: u64::from(self.page - 1) * u64::from(self.limit),
            limit: u64::from(self.limit),
        }
    }
}

/// Page envelope: `{items, total, page, limit, has_more}`.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl<T> PageResult<T> {
    /// Wraps one window of items. Items beyond `limit` are dropped so the
    /// envelope never carries more than a page.
    pub fn new(mut items: Vec<T>, total: u64, request: PageRequest) -> Self {
        items.truncate(request.limit as usize);
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            has_more: total > u64::from(request.page) * u64::from(request.limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_page_and_limit() {
        assert!(matches!(PageRequest::new(0, 20), Err(DomainError::Validation(_))));
        assert!(matches!(PageRequest::new(1, 0), Err(DomainError::Validation(_))));
        assert!(matches!(PageRequest::new(1, 101), Err(DomainError::Validation(_))));
        assert!(PageRequest::new(1, 100).is_ok());
    }

    #[test]
    fn window_covers_inclusive_range() {
        let req = PageRequest::new(3, 20).unwrap();
        assert_eq!(req.window(), PageWindow { offset: 40, limit: 20 });
        assert_eq!(PageRequest::new(1, 10).unwrap().window().offset, 0);
    }

    #[test]
    fn has_more_on_second_page() {
        let req = PageRequest::new(2, 20).unwrap();
        assert!(PageResult::new(vec![0; 20], 45, req).has_more);
        assert!(!PageResult::new(vec![0; 20], 40, req).has_more);
    }

    #[test]
    fn items_never_exceed_limit() {
        let req = PageRequest::new(1, 3).unwrap();
        let page = PageResult::new(vec![1, 2, 3, 4, 5], 5, req);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.has_more);
    }

    #[test]
    fn defaults_apply_to_missing_params() {
        let req = PageRequest::from_params(None, None, 10).unwrap();
        assert_eq!((req.page(), req.limit()), (1, 10));
        assert!(PageRequest::from_params(Some(0), None, 10).is_err());
    }

    #[test]
    fn map_keeps_envelope() {
        let req = PageRequest::new(1, 2).unwrap();
        let page = PageResult::new(vec![1, 2], 7, req).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 7);
        assert!(page.has_more);
    }
}
