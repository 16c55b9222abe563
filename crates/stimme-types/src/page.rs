use serde::Serialize;

/// Hard cap on page size across every listing endpoint.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Normalized pagination input. Construction clamps rather than rejects:
/// out-of-range or unparseable values degrade to sane defaults, so a bad
/// query string never turns into a 4xx on a listing route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

impl PageParams {
    pub fn clamped(page: Option<&str>, size: Option<&str>, default_size: u32) -> Self {
        let page = page
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        let size = size
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(default_size)
            .clamp(1, MAX_PAGE_SIZE);
        PageParams { page, size }
    }

    /// Rows to skip before this page starts. Widened to u64 so an absurd
    /// but well-formed page number cannot overflow the multiply.
    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }
}

/// Pagination block included in every listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl PageInfo {
    pub fn new(params: PageParams, total: u64) -> Self {
        let size = params.size as u64;
        PageInfo {
            page: params.page,
            size: params.size,
            total,
            total_pages: total.div_ceil(size),
            has_more: params.skip() + size < total,
        }
    }

    /// The degraded-mode block: echoes the request, zeroes everything else.
    pub fn empty(params: PageParams) -> Self {
        PageInfo {
            page: params.page,
            size: params.size,
            total: 0,
            total_pages: 0,
            has_more: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, size: u32) -> PageParams {
        PageParams { page, size }
    }

    #[test]
    fn clamps_bad_input() {
        assert_eq!(PageParams::clamped(None, None, 12), params(1, 12));
        assert_eq!(PageParams::clamped(Some("0"), Some("999"), 12), params(1, 50));
        assert_eq!(PageParams::clamped(Some("abc"), Some("-3"), 20), params(1, 20));
        assert_eq!(PageParams::clamped(Some("3"), Some("25"), 12), params(3, 25));
    }

    #[test]
    fn skip_math() {
        assert_eq!(params(1, 12).skip(), 0);
        assert_eq!(params(2, 12).skip(), 12);
        assert_eq!(params(5, 7).skip(), 28);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let params = PageParams::clamped(Some("4294967295"), Some("50"), 12);
        assert_eq!(params.page, u32::MAX);
        assert_eq!(params.skip(), (u32::MAX as u64 - 1) * 50);

        let info = PageInfo::new(params, 13);
        assert!(!info.has_more);
        assert_eq!(info.total_pages, 1);
    }

    #[test]
    fn thirteen_rows_two_pages() {
        let info = PageInfo::new(params(1, 12), 13);
        assert_eq!(info.total_pages, 2);
        assert!(info.has_more);

        let info = PageInfo::new(params(2, 12), 13);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_more);
    }

    #[test]
    fn has_more_matches_invariant() {
        // has_more == page*size < total, for skip = (page-1)*size
        for total in [0u64, 1, 11, 12, 13, 24, 25, 100] {
            for page in 1u32..=5 {
                for size in [1u32, 12, 50] {
                    let info = PageInfo::new(params(page, size), total);
                    assert_eq!(info.has_more, (page as u64 * size as u64) < total);
                    assert_eq!(info.total_pages, total.div_ceil(size as u64));
                }
            }
        }
    }

    #[test]
    fn empty_is_zeroed() {
        let info = PageInfo::empty(params(4, 12));
        assert_eq!(info.page, 4);
        assert_eq!(info.total, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_more);
    }
}
