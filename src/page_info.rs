use serde::{Deserialize, Serialize};

/// Number of page links rendered around the current page
pub const PAGE_WINDOW: i64 = 5;

/// Value of `prev_page` / `next_page` when there is no such page
pub const NO_PAGE: i64 = -1;

/// Pagination metadata for one response
#[allow(clippy::module_name_repetitions, reason = "wire name of the metadata record")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Number of pages
    pub total: i64,
    /// Current 1-based page, as given
    pub page: i64,
    /// Page size
    pub limit: i64,
    /// Previous page or [`NO_PAGE`]
    pub prev_page: i64,
    /// Next page or [`NO_PAGE`]
    pub next_page: i64,
    /// Page links to render, ascending
    pub page_list: Vec<i64>,
}

impl PageInfo {
    /// Previous page, if any
    #[must_use]
    pub const fn prev(&self) -> Option<i64> {
        if self.prev_page == NO_PAGE {
            None
        } else {
            Some(self.prev_page)
        }
    }

    /// Next page, if any
    #[must_use]
    pub const fn next(&self) -> Option<i64> {
        if self.next_page == NO_PAGE {
            None
        } else {
            Some(self.next_page)
        }
    }
}

/// Describe where `current_page` (1-based) sits among `total` items split in
/// pages of `limit`, with a window of [`PAGE_WINDOW`] page links.
///
/// Never fails: a zero `limit` means zero pages, and out of range pages are
/// carried through unchecked.
#[must_use]
pub fn page_info(total: i64, current_page: i64, limit: i64) -> PageInfo {
    page_info_with_window(total, current_page, limit, PAGE_WINDOW)
}

/// Same as [`page_info`] with a window of `width` links (at least one)
#[must_use]
pub fn page_info_with_window(total: i64, current_page: i64, limit: i64, width: i64) -> PageInfo {
    let total_pages = page_count(total, limit);

    let prev_page = if current_page == 1 || total_pages <= 0 {
        NO_PAGE
    } else {
        current_page.saturating_sub(1)
    };
    let next_page = if current_page == total_pages || total_pages <= 0 {
        NO_PAGE
    } else {
        current_page.saturating_add(1)
    };

    PageInfo {
        total: total_pages,
        page: current_page,
        limit,
        prev_page,
        next_page,
        page_list: page_window(total_pages, current_page, width.max(1)),
    }
}

/// `ceil(total / limit)`, 0 when `limit` is 0
fn page_count(total: i64, limit: i64) -> i64 {
    if limit == 0 {
        return 0;
    }
    // i64::MIN / -1 is the only overflowing quotient
    let (Some(quotient), Some(remainder)) = (total.checked_div(limit), total.checked_rem(limit))
    else {
        return i64::MAX;
    };
    if remainder != 0 && (remainder > 0) == (limit > 0) {
        quotient + 1
    } else {
        quotient
    }
}

fn page_window(total_pages: i64, current_page: i64, width: i64) -> Vec<i64> {
    if total_pages <= width {
        return (1..=total_pages).collect();
    }

    let mid = width / 2 + width % 2;
    let mut begin = current_page.saturating_sub(mid).max(0);
    let end = begin.saturating_add(width).min(total_pages);
    if end - begin < width {
        begin = end - width;
    }
    (begin + 1..=end).collect()
}
