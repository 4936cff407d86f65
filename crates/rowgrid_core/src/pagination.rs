use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page sizes offered by default.
pub const SIZE_PER_PAGE_LIST: [usize; 4] = [10, 25, 30, 50];

/// Number of page links shown at once.
pub const PAGINATION_SIZE: usize = 5;

fn default_size_list() -> Vec<usize> {
    SIZE_PER_PAGE_LIST.to_vec()
}

fn default_page() -> usize {
    1
}

fn default_pagination_size() -> usize {
    PAGINATION_SIZE
}

/// Pagination options of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_page")]
    pub page: usize,

    /// Falls back to the first entry of `size_per_page_list`.
    #[serde(default)]
    pub size_per_page: Option<usize>,

    #[serde(default = "default_size_list")]
    pub size_per_page_list: Vec<usize>,

    #[serde(default = "default_pagination_size")]
    pub pagination_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            page: 1,
            size_per_page: None,
            size_per_page_list: default_size_list(),
            pagination_size: PAGINATION_SIZE,
        }
    }
}

impl PaginationSettings {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_size_per_page(mut self, size: usize) -> Self {
        self.size_per_page = Some(size);
        self
    }

    pub fn with_pagination_size(mut self, links: usize) -> Self {
        self.pagination_size = links;
        self
    }

    pub fn initial_size(&self) -> usize {
        self.size_per_page
            .or_else(|| self.size_per_page_list.first().copied())
            .unwrap_or(SIZE_PER_PAGE_LIST[0])
    }

    pub fn initial_page(&self) -> PageRequest {
        PageRequest {
            page: self.page.max(1),
            size: self.initial_size().max(1),
        }
    }
}

/// One-based page number with its page size. Both are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Option<Self> {
        if page == 0 || size == 0 {
            None
        } else {
            Some(Self { page, size })
        }
    }

    /// Last valid page for `total` rows. An empty view still has page 1.
    pub fn last_page(size: usize, total: usize) -> usize {
        if size == 0 {
            return 1;
        }
        total.div_ceil(size).max(1)
    }

    /// This request with the page clamped to the last valid one.
    pub fn clamped(self, total: usize) -> Self {
        Self {
            page: self.page.min(Self::last_page(self.size, total)),
            size: self.size,
        }
    }

    /// Row range of this page, after clamping, within a view of `total` rows.
    pub fn range(self, total: usize) -> Range<usize> {
        let clamped = self.clamped(total);
        let start = (clamped.page - 1) * clamped.size;
        let end = (start + clamped.size).min(total);
        start.min(total)..end
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }
}

/// Page numbers to show as links: a window of `pagination_size` pages
/// around `current`, shifted to stay within `1..=last`.
pub fn page_window(current: usize, last: usize, pagination_size: usize) -> Range<usize> {
    let last = last.max(1);
    let size = pagination_size.clamp(1, last);
    let current = current.clamp(1, last);

    let mut start = current.saturating_sub(size / 2).max(1);
    if start + size - 1 > last {
        start = last + 1 - size;
    }

    start..start + size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_page_or_size() {
        assert!(PageRequest::new(0, 10).is_none());
        assert!(PageRequest::new(1, 0).is_none());
        assert!(PageRequest::new(1, 1).is_some());
    }

    #[test]
    fn range_slices_by_page() {
        let page = PageRequest::new(2, 10).unwrap();
        assert_eq!(page.range(25), 10..20);

        let page = PageRequest::new(3, 10).unwrap();
        assert_eq!(page.range(25), 20..25);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let page = PageRequest::new(9, 10).unwrap();
        assert_eq!(page.clamped(25).page, 3);
        assert_eq!(page.range(25), 20..25);
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let page = PageRequest::new(4, 10).unwrap();
        assert_eq!(PageRequest::last_page(10, 0), 1);
        assert_eq!(page.range(0), 0..0);
    }

    #[test]
    fn window_stays_within_bounds() {
        assert_eq!(page_window(1, 10, 5), 1..6);
        assert_eq!(page_window(6, 10, 5), 4..9);
        assert_eq!(page_window(10, 10, 5), 6..11);
        assert_eq!(page_window(2, 3, 5), 1..4);
    }

    #[test]
    fn settings_defaults() {
        let settings: PaginationSettings = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert_eq!(settings.initial_page(), PageRequest { page: 1, size: 10 });
        assert_eq!(settings.pagination_size, 5);
    }
}
