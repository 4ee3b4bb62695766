//! # Pagination
//!
//! Page/limit parsing and the metadata returned alongside a page of
//! results. Query values arrive as raw strings: anything that does not
//! parse as an integer falls back to the default, and parsed values are
//! clamped into `1..` (and `..=MAX_LIMIT` for the limit).

use serde::{Deserialize, Serialize};

/// Page number used when none (or garbage) is supplied.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when none (or garbage) is supplied.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Page size, in `1..=MAX_LIMIT`.
    pub limit: u32,
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
    /// Build a page request from numeric values, clamping out-of-range input.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.clamp(1, i64::from(u32::MAX)) as u32,
            limit: limit.clamp(1, i64::from(MAX_LIMIT)) as u32,
        }
    }

    /// Build a page request from raw query-string values.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_or(page, i64::from(DEFAULT_PAGE));
        let limit = parse_or(limit, i64::from(DEFAULT_LIMIT));
        Self::new(page, limit)
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Pagination metadata for a listed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The page that was returned.
    pub current_page: u32,
    /// `ceil(total / limit)`; zero when there are no records.
    pub total_pages: u64,
    /// Total number of records across all pages.
    pub total: u64,
    /// The page size used.
    pub limit: u32,
}

impl PageInfo {
    /// Compute metadata for `request` over a collection of `total` records.
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            current_page: request.page,
            total_pages: total.div_ceil(u64::from(request.limit)),
            total,
            limit: request.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(PageRequest::from_query(None, None), PageRequest::default());
    }

    #[test]
    fn non_numeric_falls_back_to_defaults() {
        let req = PageRequest::from_query(Some("abc"), Some("ten"));
        assert_eq!(req.page, DEFAULT_PAGE);
        assert_eq!(req.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn clamps_to_positive_values() {
        let req = PageRequest::from_query(Some("0"), Some("-4"));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn caps_limit() {
        let req = PageRequest::from_query(Some("2"), Some("5000"));
        assert_eq!(req.limit, MAX_LIMIT);
        assert_eq!(req.offset(), u64::from(MAX_LIMIT));
    }

    #[test]
    fn twenty_five_records_in_pages_of_ten() {
        let info = PageInfo::new(PageRequest::new(1, 10), 25);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total, 25);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let info = PageInfo::new(PageRequest::default(), 0);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.current_page, 1);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(PageInfo::new(PageRequest::default(), 11)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["total"], 11);
        assert_eq!(json["limit"], 10);
    }

    proptest! {
        #[test]
        fn pages_cover_collection_exactly(total in 0u64..2_000, limit in 1i64..=100) {
            let info = PageInfo::new(PageRequest::new(1, limit), total);
            let mut covered = 0u64;
            for page in 1..=info.total_pages {
                let req = PageRequest::new(page as i64, limit);
                let remaining = total - req.offset();
                covered += remaining.min(u64::from(req.limit));
            }
            prop_assert_eq!(covered, total);
        }

        #[test]
        fn any_input_is_clamped(page in any::<i64>(), limit in any::<i64>()) {
            let req = PageRequest::new(page, limit);
            prop_assert!(req.page >= 1);
            prop_assert!((1..=MAX_LIMIT).contains(&req.limit));
        }
    }
}
