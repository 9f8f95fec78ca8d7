//! Offset pagination.
//!
//! Pages are 1-based. A page is described by the total number of matching
//! records plus the slice of records for the requested window.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a caller may ask for.
pub const MAX_LIMIT: u64 = 100;

/// Validated page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Fill in defaults for absent values, reject zero, a `limit` above
    /// [`MAX_LIMIT`] and a `page` whose offset does not fit the database.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> ResultEngine<Self> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(EngineError::InvalidArgument(
                "page must be >= 1".to_string(),
            ));
        }
        if limit == 0 {
            return Err(EngineError::InvalidArgument(
                "limit must be >= 1".to_string(),
            ));
        }
        if limit > MAX_LIMIT {
            return Err(EngineError::InvalidArgument(format!(
                "limit must be <= {MAX_LIMIT}"
            )));
        }
        let fits = (page - 1)
            .checked_mul(limit)
            .is_some_and(|offset| i64::try_from(offset).is_ok());
        if !fits {
            return Err(EngineError::InvalidArgument(format!(
                "page {page} is out of range"
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total_records: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub limit: u64,
    pub records: Vec<T>,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(total_records: u64, request: PageRequest, records: Vec<T>) -> Self {
        let total_pages = total_records.div_ceil(request.limit);
        let current_page = request.page;
        Self {
            total_records,
            total_pages,
            current_page,
            limit: request.limit,
            records,
            next_page: (current_page < total_pages).then_some(current_page + 1),
            previous_page: (current_page > 1).then_some(current_page - 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_records: self.total_records,
            total_pages: self.total_pages,
            current_page: self.current_page,
            limit: self.limit,
            records: self.records.into_iter().map(f).collect(),
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, limit: u64) -> PageRequest {
        PageRequest::new(Some(page), Some(limit)).unwrap()
    }

    #[test]
    fn first_page_of_three() {
        let page = Page::new(25, request(1, 10), vec![(); 10]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.previous_page, None);
    }

    #[test]
    fn last_page_of_three() {
        let page = Page::new(25, request(3, 10), vec![(); 5]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, Some(2));
    }

    #[test]
    fn empty_result_has_no_neighbours() {
        let page: Page<()> = Page::new(0, PageRequest::default(), Vec::new());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, None);
    }

    #[test]
    fn page_past_the_end_points_back() {
        let page: Page<()> = Page::new(5, request(4, 10), Vec::new());
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, Some(3));
    }

    #[test]
    fn defaults_and_offsets() {
        let req = PageRequest::new(None, None).unwrap();
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
        assert_eq!(req.offset(), 0);
        assert_eq!(request(3, 10).offset(), 20);
    }

    #[test]
    fn zero_limit_and_page_are_rejected() {
        assert!(matches!(
            PageRequest::new(Some(1), Some(0)),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            PageRequest::new(Some(0), Some(10)),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn oversized_limit_is_rejected() {
        assert!(PageRequest::new(Some(1), Some(MAX_LIMIT)).is_ok());
        assert_eq!(
            PageRequest::new(Some(1), Some(MAX_LIMIT + 1)),
            Err(EngineError::InvalidArgument("limit must be <= 100".to_string()))
        );
        assert!(PageRequest::new(Some(1), Some(u64::MAX)).is_err());
    }

    #[test]
    fn page_beyond_offset_range_is_rejected() {
        assert!(matches!(
            PageRequest::new(Some(u64::MAX), Some(10)),
            Err(EngineError::InvalidArgument(_))
        ));
        let last = i64::MAX as u64 / 10 + 1;
        assert!(PageRequest::new(Some(last), Some(10)).is_ok());
        assert!(PageRequest::new(Some(last + 1), Some(10)).is_err());
    }
}
